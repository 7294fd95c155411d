//! Application startup and lifecycle management.

use crate::config::GeneratorConfig;
use crate::handlers::{health_check, metrics_endpoint, random_number};
use crate::services::{RandomSource, SeededRandomSource, ThreadRandomSource};
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
    pub random: Arc<dyn RandomSource>,
}

impl AppState {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Pick the random source described by the configuration.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let random: Arc<dyn RandomSource> = match config.random.seed {
            Some(seed) => {
                tracing::info!(seed, "Using seeded random source");
                Arc::new(SeededRandomSource::new(seed))
            }
            None => {
                tracing::info!("Using thread-local random source");
                Arc::new(ThreadRandomSource)
            }
        };

        Self::new(random)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/numbers/random", get(random_number))
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
    /// Bind the listener and assemble the router. Port 0 picks a free port.
    pub async fn build(config: GeneratorConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(&config);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Number generator listening on port {}", port);

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
