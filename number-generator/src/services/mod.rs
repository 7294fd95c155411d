pub mod metrics;
pub mod random;

pub use metrics::{get_metrics, init_metrics, record_number_generated};
pub use random::{RandomSource, SeededRandomSource, ThreadRandomSource, MAX_NUMBER, MIN_NUMBER};
