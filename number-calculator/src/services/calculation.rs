//! Fancy calculation over two generator draws.

use super::generator_client::{GeneratorClientError, NumberSource};
use std::fmt::{self, Write};
use thiserror::Error;

/// Failures of a fancy calculation. `Display` yields the message shown to
/// clients after the `Error: ` prefix.
#[derive(Debug, Error)]
pub enum CalculationError {
    #[error("Failed to retrieve random numbers from generator service: {0}")]
    Upstream(#[from] GeneratorClientError),

    #[error("Failed to retrieve random numbers from generator service")]
    MissingNumber,

    #[error("Failed to format calculation results: {0}")]
    Formatting(#[from] fmt::Error),
}

/// Sum, product, average and primality of two numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    pub num1: i32,
    pub num2: i32,
    pub sum: i64,
    pub product: i64,
    pub average: f64,
    pub is_prime: bool,
}

impl CalculationResult {
    pub fn new(num1: i32, num2: i32) -> Self {
        let sum = i64::from(num1) + i64::from(num2);
        Self {
            num1,
            num2,
            sum,
            product: i64::from(num1) * i64::from(num2),
            average: sum as f64 / 2.0,
            is_prime: is_prime(sum),
        }
    }

    /// Plaintext report, one `\n`-terminated line per figure.
    pub fn render(&self) -> Result<String, fmt::Error> {
        let primality = if self.is_prime { "prime" } else { "not prime" };

        let mut report = String::new();
        writeln!(report, "Fancy Calculation Results:")?;
        writeln!(report, "Numbers: {} and {}", self.num1, self.num2)?;
        writeln!(report, "Sum: {} ({})", self.sum, primality)?;
        writeln!(report, "Product: {}", self.product)?;
        writeln!(report, "Average: {:.2}", self.average)?;
        Ok(report)
    }
}

/// Trial division over the 6k ± 1 wheel.
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let mut i = 5;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Fetch two numbers, one after the other, and render the report.
///
/// A failed first call aborts before the second is made. An absent value is
/// only detected once both calls have returned.
pub async fn fancy_calculation(numbers: &dyn NumberSource) -> Result<String, CalculationError> {
    let first = numbers.fetch_random_number().await?;
    let second = numbers.fetch_random_number().await?;

    let (Some(num1), Some(num2)) = (first, second) else {
        return Err(CalculationError::MissingNumber);
    };

    let result = CalculationResult::new(num1, num2);
    tracing::debug!(
        num1,
        num2,
        sum = result.sum,
        product = result.product,
        is_prime = result.is_prime,
        "Computed fancy calculation"
    );

    Ok(result.render()?)
}
