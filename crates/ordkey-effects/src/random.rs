//! Random effect handlers
//!
//! This module legitimately uses `rand::thread_rng()`: it is the handler
//! layer where actual system randomness enters the protocol.

use async_trait::async_trait;
use ordkey_core::effects::RandomEffects;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Real random handler backed by the thread-local RNG
#[derive(Debug, Clone, Default)]
pub struct RealRandomHandler;

impl RealRandomHandler {
    /// Create a new real random handler
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RandomEffects for RealRandomHandler {
    async fn random_u64(&self) -> u64 {
        rand::thread_rng().gen()
    }

    async fn random_range(&self, low: u64, high: u64) -> u64 {
        if low >= high {
            return low;
        }
        rand::thread_rng().gen_range(low..=high)
    }

    async fn random_bit(&self) -> bool {
        rand::thread_rng().gen()
    }
}

/// Deterministic random handler seeded from a `u64`
///
/// Every draw advances one shared ChaCha stream, so the sequence of values
/// depends only on the seed and the order of calls.
#[derive(Debug)]
pub struct SeededRandomHandler {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededRandomHandler {
    /// Create a handler whose stream is fixed by `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

#[async_trait]
impl RandomEffects for SeededRandomHandler {
    async fn random_u64(&self) -> u64 {
        self.rng.lock().gen()
    }

    async fn random_range(&self, low: u64, high: u64) -> u64 {
        if low >= high {
            return low;
        }
        self.rng.lock().gen_range(low..=high)
    }

    async fn random_bit(&self) -> bool {
        self.rng.lock().gen()
    }
}
