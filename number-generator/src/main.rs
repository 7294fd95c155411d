use number_generator::config::GeneratorConfig;
use number_generator::services::init_metrics;
use number_generator::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("number-generator", "info", otlp_endpoint.as_deref())?;

    // Must run before any metric is recorded
    init_metrics()?;

    let config = GeneratorConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let app = Application::build(config).await?;
    app.run_until_stopped().await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
