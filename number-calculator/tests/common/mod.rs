use axum::{extract::State, http::StatusCode, routing::get, Router};
use number_calculator::config::{CalculatorConfig, GeneratorServiceConfig};
use number_calculator::startup::Application;
use service_core::config::Config as CoreConfig;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn(generator_url: &str) -> Self {
        Self::spawn_with(generator_url, false).await
    }

    pub async fn spawn_with(generator_url: &str, strict_upstream_errors: bool) -> Self {
        // Use random port for testing (port 0)
        let config = CalculatorConfig {
            common: CoreConfig { port: 0 },
            generator: GeneratorServiceConfig {
                url: generator_url.to_string(),
                timeout: Some(Duration::from_secs(2)),
            },
            strict_upstream_errors,
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }

    pub async fn get_fancy(&self) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}/api/calculate/fancy", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

#[derive(Clone)]
struct StubState {
    replies: Arc<Mutex<VecDeque<(StatusCode, String)>>>,
    hits: Arc<AtomicUsize>,
}

/// A stand-in number generator replaying scripted `(status, body)` replies.
pub struct StubGenerator {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl StubGenerator {
    pub async fn spawn(replies: Vec<(StatusCode, &str)>) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = StubState {
            replies: Arc::new(Mutex::new(
                replies
                    .into_iter()
                    .map(|(status, body)| (status, body.to_string()))
                    .collect(),
            )),
            hits: hits.clone(),
        };

        let router = Router::new()
            .route("/api/numbers/random", get(stub_random))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub generator");
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        StubGenerator {
            url: format!("http://127.0.0.1:{}/api/numbers/random", port),
            hits,
        }
    }

    /// Stub answering with plain integers.
    pub async fn numbers(values: &[i32]) -> Self {
        let bodies: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        Self::spawn(
            bodies
                .iter()
                .map(|b| (StatusCode::OK, b.as_str()))
                .collect(),
        )
        .await
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn stub_random(State(state): State<StubState>) -> (StatusCode, String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, "exhausted".to_string()))
}

/// URL on which nothing is listening.
pub fn unreachable_generator_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api/numbers/random", port)
}
