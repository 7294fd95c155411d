use workflow_tests::WorkflowContext;

pub async fn setup() -> WorkflowContext {
    WorkflowContext::start(None)
        .await
        .expect("Failed to start services")
}

#[allow(dead_code)]
pub async fn setup_seeded(seed: u64) -> WorkflowContext {
    WorkflowContext::start(Some(seed))
        .await
        .expect("Failed to start services")
}
