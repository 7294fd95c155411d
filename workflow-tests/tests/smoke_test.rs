//! Smoke test to verify workflow-tests infrastructure.

mod common;

#[tokio::test]
async fn workflow_context_starts_both_services() {
    let ctx = common::setup().await;

    assert_ne!(ctx.generator_address, ctx.calculator_address);
    assert!(ctx.generator_address.starts_with("http://127.0.0.1:"));
    assert!(ctx.calculator_address.starts_with("http://127.0.0.1:"));
}

#[test]
fn parse_report_rejects_error_bodies() {
    assert!(workflow_tests::parse_report(
        "Error: Failed to retrieve random numbers from generator service"
    )
    .is_err());
}

#[test]
fn parse_report_reads_figures() {
    let report = workflow_tests::parse_report(
        "Fancy Calculation Results:\nNumbers: 5 and 6\nSum: 11 (prime)\nProduct: 30\nAverage: 5.50\n",
    )
    .unwrap();

    assert_eq!(report.num1, 5);
    assert_eq!(report.num2, 6);
    assert_eq!(report.sum, 11);
    assert!(report.prime);
    assert_eq!(report.product, 30);
    assert_eq!(report.average, "5.50");
}
