//! service-core: Shared infrastructure for the number microservices.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod shutdown;

pub use shutdown::shutdown_signal;
