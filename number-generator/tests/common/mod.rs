use number_generator::config::{GeneratorConfig, RandomConfig};
use number_generator::startup::Application;
use service_core::config::Config as CoreConfig;

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_seed(None).await
    }

    pub async fn spawn_with_seed(seed: Option<u64>) -> Self {
        // Use random port for testing (port 0)
        let config = GeneratorConfig {
            common: CoreConfig { port: 0 },
            random: RandomConfig { seed },
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

    pub fn random_url(&self) -> String {
        format!("{}/api/numbers/random", self.address)
    }
}
