//! Application startup and lifecycle management.

use crate::config::CalculatorConfig;
use crate::handlers::{calculate_fancy, health_check, metrics_endpoint};
use crate::services::{GeneratorClient, NumberSource};
use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub numbers: Arc<dyn NumberSource>,
    pub strict_upstream_errors: bool,
}

impl AppState {
    pub fn new(numbers: Arc<dyn NumberSource>, strict_upstream_errors: bool) -> Self {
        Self {
            numbers,
            strict_upstream_errors,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/calculate/fancy", get(calculate_fancy))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build against the generator described in `config`.
    pub async fn build(config: CalculatorConfig) -> Result<Self, AppError> {
        let client = GeneratorClient::new(&config.generator).map_err(|e| {
            tracing::error!("Failed to create generator client: {}", e);
            AppError::InternalError(anyhow::Error::new(e))
        })?;

        Self::build_with_source(config, Arc::new(client)).await
    }

    /// Build with an explicit number source in place of the HTTP client.
    pub async fn build_with_source(
        config: CalculatorConfig,
        numbers: Arc<dyn NumberSource>,
    ) -> Result<Self, AppError> {
        if config.strict_upstream_errors {
            tracing::info!("Strict upstream errors enabled: failures return 5xx");
        }

        let state = AppState::new(numbers, config.strict_upstream_errors);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Number calculator listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(service_core::shutdown_signal())
            .await
    }
}
