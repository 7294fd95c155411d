//! Cross-service workflow integration tests library.
//!
//! Boots the number generator and the calculator in-process on random ports
//! so tests can drive the full client -> calculator -> generator flow.

use anyhow::{anyhow, Result};
use number_calculator::config::{CalculatorConfig, GeneratorServiceConfig};
use number_generator::config::{GeneratorConfig, RandomConfig};
use service_core::config::Config as CoreConfig;
use std::sync::Once;
use std::time::Duration;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,workflow_tests=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Addresses of a running generator + calculator pair.
pub struct WorkflowContext {
    pub generator_address: String,
    pub calculator_address: String,
    pub client: reqwest::Client,
}

impl WorkflowContext {
    /// Start both services. The calculator points at the freshly started generator.
    pub async fn start(seed: Option<u64>) -> Result<Self> {
        init_tracing();

        let generator = number_generator::startup::Application::build(GeneratorConfig {
            common: CoreConfig { port: 0 },
            random: RandomConfig { seed },
        })
        .await?;
        let generator_address = format!("http://127.0.0.1:{}", generator.port());
        tokio::spawn(async move {
            generator.run_until_stopped().await.ok();
        });

        let calculator = number_calculator::startup::Application::build(CalculatorConfig {
            common: CoreConfig { port: 0 },
            generator: GeneratorServiceConfig {
                url: format!("{}/api/numbers/random", generator_address),
                timeout: Some(Duration::from_secs(5)),
            },
            strict_upstream_errors: false,
        })
        .await?;
        let calculator_address = format!("http://127.0.0.1:{}", calculator.port());
        tokio::spawn(async move {
            calculator.run_until_stopped().await.ok();
        });

        let ctx = Self {
            generator_address,
            calculator_address,
            client: reqwest::Client::new(),
        };

        ctx.wait_until_healthy(&ctx.generator_address).await?;
        ctx.wait_until_healthy(&ctx.calculator_address).await?;

        Ok(ctx)
    }

    async fn wait_until_healthy(&self, address: &str) -> Result<()> {
        let url = format!("{}/health", address);
        for _ in 0..50 {
            if let Ok(response) = self.client.get(&url).send().await {
                if response.status().is_success() {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        Err(anyhow!("Service at {} did not become healthy", address))
    }

    /// `GET /api/calculate/fancy` on the calculator, returning the body.
    pub async fn fancy(&self) -> Result<String> {
        let body = self
            .client
            .get(format!("{}/api/calculate/fancy", self.calculator_address))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

/// Figures parsed back out of a calculator report.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReport {
    pub num1: i64,
    pub num2: i64,
    pub sum: i64,
    pub prime: bool,
    pub product: i64,
    pub average: String,
}

pub fn parse_report(body: &str) -> Result<ParsedReport> {
    let mut lines = body.lines();

    if lines.next() != Some("Fancy Calculation Results:") {
        return Err(anyhow!("Missing report header in {:?}", body));
    }

    let numbers = field(lines.next(), "Numbers: ")?;
    let (num1, num2) = numbers
        .split_once(" and ")
        .ok_or_else(|| anyhow!("Malformed numbers line: {}", numbers))?;

    let sum_line = field(lines.next(), "Sum: ")?;
    let (sum, primality) = sum_line
        .split_once(' ')
        .ok_or_else(|| anyhow!("Malformed sum line: {}", sum_line))?;
    let prime = match primality {
        "(prime)" => true,
        "(not prime)" => false,
        other => return Err(anyhow!("Unexpected primality: {}", other)),
    };

    let product = field(lines.next(), "Product: ")?;
    let average = field(lines.next(), "Average: ")?;

    Ok(ParsedReport {
        num1: num1.parse()?,
        num2: num2.parse()?,
        sum: sum.parse()?,
        prime,
        product: product.parse()?,
        average: average.to_string(),
    })
}

fn field<'a>(line: Option<&'a str>, prefix: &str) -> Result<&'a str> {
    line.and_then(|l| l.strip_prefix(prefix))
        .ok_or_else(|| anyhow!("Expected line starting with {:?}", prefix))
}
