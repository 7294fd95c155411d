pub mod health;
pub mod metrics;
pub mod numbers;

pub use health::health_check;
pub use metrics::metrics_endpoint;
pub use numbers::random_number;
