//! Random number sources.
//!
//! Handlers never touch a global RNG; they draw from the `RandomSource`
//! held in application state so tests can substitute a seeded one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Smallest value a source may return.
pub const MIN_NUMBER: i32 = 1;

/// Largest value a source may return.
pub const MAX_NUMBER: i32 = 100;

/// Source of uniformly distributed integers in `[MIN_NUMBER, MAX_NUMBER]`.
pub trait RandomSource: Send + Sync {
    fn next_number(&self) -> i32;
}

/// Draws from the calling thread's RNG. No shared state between requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn next_number(&self) -> i32 {
        rand::thread_rng().gen_range(MIN_NUMBER..=MAX_NUMBER)
    }
}

/// Deterministic source for reproducible runs.
///
/// A single seeded stream is shared by all requests, so draws are serialized
/// through a mutex.
pub struct SeededRandomSource {
    rng: Mutex<StdRng>,
}

impl SeededRandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn next_number(&self) -> i32 {
        // A panic while holding the lock cannot leave the RNG in an invalid state.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(MIN_NUMBER..=MAX_NUMBER)
    }
}
