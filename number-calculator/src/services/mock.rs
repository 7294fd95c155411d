//! Scripted `NumberSource` for tests and local runs without a generator.

use super::generator_client::{GeneratorClientError, NumberSource};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// One scripted reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockResponse {
    Number(i32),
    /// Upstream answered without a value.
    Empty,
    /// Upstream answered with this non-success HTTP status.
    Status(u16),
}

/// Replays a fixed sequence of responses, then reports empty bodies.
pub struct MockNumberSource {
    responses: Mutex<VecDeque<MockResponse>>,
    calls: AtomicUsize,
}

impl MockNumberSource {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Convenience for the common "two numbers" script.
    pub fn numbers(num1: i32, num2: i32) -> Self {
        Self::new(vec![MockResponse::Number(num1), MockResponse::Number(num2)])
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NumberSource for MockNumberSource {
    async fn fetch_random_number(&self) -> Result<Option<i32>, GeneratorClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let next = self
            .responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or(MockResponse::Empty);

        tracing::info!(response = ?next, "[MOCK] Generator response");

        match next {
            MockResponse::Number(n) => Ok(Some(n)),
            MockResponse::Empty => Ok(None),
            MockResponse::Status(status) => Err(GeneratorClientError::Status {
                url: "mock://generator".to_string(),
                status,
            }),
        }
    }
}
