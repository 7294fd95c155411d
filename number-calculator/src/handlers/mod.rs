pub mod calculate;
pub mod health;
pub mod metrics;

pub use calculate::calculate_fancy;
pub use health::health_check;
pub use metrics::metrics_endpoint;
