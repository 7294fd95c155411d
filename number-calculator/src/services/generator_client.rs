//! HTTP client for the number-generator service.

use crate::config::GeneratorServiceConfig;
use async_trait::async_trait;
use metrics::counter;
use reqwest::Client;
use service_core::observability::TracedClientExt;
use thiserror::Error;
use tracing::instrument;

/// Error type for generator calls.
#[derive(Debug, Error)]
pub enum GeneratorClientError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Generator at {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read response body from {url}: {source}")]
    ReadBody {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Generator returned a non-integer body: {0:?}")]
    InvalidBody(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Something that can hand out random numbers.
///
/// `Ok(None)` means the upstream answered successfully but without a value.
#[async_trait]
pub trait NumberSource: Send + Sync {
    async fn fetch_random_number(&self) -> Result<Option<i32>, GeneratorClientError>;
}

/// `NumberSource` backed by the generator's `GET /api/numbers/random`.
#[derive(Clone)]
pub struct GeneratorClient {
    client: Client,
    url: String,
}

impl GeneratorClient {
    pub fn new(config: &GeneratorServiceConfig) -> Result<Self, GeneratorClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(GeneratorClientError::Client)?;

        tracing::info!(
            url = %config.url,
            timeout_secs = ?config.timeout.map(|t| t.as_secs()),
            "Generator client configured"
        );

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request_number(&self) -> Result<Option<i32>, GeneratorClientError> {
        let response = self
            .client
            .traced_get(&self.url)
            .header("accept", "text/plain")
            .send()
            .await
            .map_err(|source| GeneratorClientError::Transport {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeneratorClientError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| GeneratorClientError::ReadBody {
                url: self.url.clone(),
                source,
            })?;

        parse_number(&body)
    }
}

#[async_trait]
impl NumberSource for GeneratorClient {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_random_number(&self) -> Result<Option<i32>, GeneratorClientError> {
        let result = self.request_number().await;

        let outcome = match &result {
            Ok(Some(_)) => "success",
            Ok(None) => "empty",
            Err(_) => "error",
        };
        counter!("generator_requests_total", "outcome" => outcome).increment(1);

        match &result {
            Ok(Some(number)) => tracing::debug!(number, "Received random number"),
            Ok(None) => tracing::warn!("Generator returned an empty body"),
            Err(e) => tracing::warn!(error = %e, "Generator request failed"),
        }

        result
    }
}

/// Parse a generator body. Blank bodies and a bare `null` count as "no value".
pub fn parse_number(body: &str) -> Result<Option<i32>, GeneratorClientError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }

    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| GeneratorClientError::InvalidBody(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn parses_plain_integer() {
        assert_eq!(parse_number("42").unwrap(), Some(42));
        assert_eq!(parse_number(" 7\n").unwrap(), Some(7));
    }

    #[test]
    fn blank_or_null_body_is_absent() {
        assert_eq!(parse_number("").unwrap(), None);
        assert_eq!(parse_number("   ").unwrap(), None);
        assert_eq!(parse_number("null").unwrap(), None);
    }

    #[test]
    fn non_integer_body_is_rejected() {
        let err = parse_number("forty-two").unwrap_err();
        assert!(matches!(err, GeneratorClientError::InvalidBody(ref b) if b == "forty-two"));

        assert!(parse_number("4.5").is_err());
        assert!(parse_number("{\"value\":4}").is_err());
    }

    #[tokio::test]
    async fn unreachable_generator_is_a_transport_error() {
        // Grab a free port, then release it so nothing is listening there
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = GeneratorClient::new(&GeneratorServiceConfig {
            url: format!("http://127.0.0.1:{}/api/numbers/random", port),
            timeout: Some(Duration::from_secs(2)),
        })
        .unwrap();

        let err = client.fetch_random_number().await.unwrap_err();
        assert!(matches!(err, GeneratorClientError::Transport { .. }));
        assert!(err.to_string().contains(client.url()));
    }
}
