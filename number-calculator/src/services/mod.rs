pub mod calculation;
pub mod generator_client;
pub mod metrics;
pub mod mock;

pub use calculation::{fancy_calculation, is_prime, CalculationError, CalculationResult};
pub use generator_client::{GeneratorClient, GeneratorClientError, NumberSource};
pub use metrics::{get_metrics, init_metrics, record_calculation};
pub use mock::{MockNumberSource, MockResponse};
