//! End-to-end: calculator against a real generator.

mod common;

use workflow_tests::parse_report;

fn naive_is_prime(n: i64) -> bool {
    n >= 2 && (2..n).all(|d| n % d != 0)
}

#[tokio::test]
async fn report_is_consistent_with_generated_numbers() {
    let ctx = common::setup().await;

    for _ in 0..20 {
        let body = ctx.fancy().await.expect("fancy request failed");
        let report = parse_report(&body).expect("report should parse");

        assert!((1..=100).contains(&report.num1));
        assert!((1..=100).contains(&report.num2));
        assert_eq!(report.sum, report.num1 + report.num2);
        assert_eq!(report.product, report.num1 * report.num2);
        assert_eq!(report.prime, naive_is_prime(report.sum));
        assert_eq!(
            report.average,
            format!("{:.2}", (report.num1 + report.num2) as f64 / 2.0)
        );
        assert!(body.ends_with('\n'));
    }
}

#[tokio::test]
async fn seeded_generators_give_identical_reports() {
    let first = common::setup_seeded(31).await;
    let second = common::setup_seeded(31).await;

    for _ in 0..5 {
        let a = first.fancy().await.unwrap();
        let b = second.fancy().await.unwrap();
        assert_eq!(a, b);
    }
}

#[tokio::test]
async fn generator_is_reachable_directly() {
    let ctx = common::setup().await;

    let body = ctx
        .client
        .get(format!("{}/api/numbers/random", ctx.generator_address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    let number: i64 = body.parse().unwrap();
    assert!((1..=100).contains(&number));
}
