//! Randomness effect
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `ordkey-effects`
//! - **Usage**: sleep jitter and the own/peer coin flip during generation

use async_trait::async_trait;

/// Source of uniform random values
#[async_trait]
pub trait RandomEffects: Send + Sync {
    /// Uniform `u64`
    async fn random_u64(&self) -> u64;

    /// Uniform value in `low..=high`. Callers guarantee `low <= high`.
    async fn random_range(&self, low: u64, high: u64) -> u64;

    /// Unbiased coin flip
    async fn random_bit(&self) -> bool {
        self.random_u64().await & 1 == 1
    }
}

/// Blanket implementation for Arc<T> where T: RandomEffects
#[async_trait]
impl<T: RandomEffects + ?Sized> RandomEffects for std::sync::Arc<T> {
    async fn random_u64(&self) -> u64 {
        (**self).random_u64().await
    }

    async fn random_range(&self, low: u64, high: u64) -> u64 {
        (**self).random_range(low, high).await
    }

    async fn random_bit(&self) -> bool {
        (**self).random_bit().await
    }
}
