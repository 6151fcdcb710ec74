//! Production time handler

use async_trait::async_trait;
use ordkey_core::effects::{PhysicalTimeEffects, TimeError};
use ordkey_core::Timestamp;
use std::time::Duration;

/// Real time handler for production use
///
/// Stateless; reads the system clock and sleeps on the tokio timer.
#[derive(Debug, Clone, Default)]
pub struct RealTimeHandler;

impl RealTimeHandler {
    /// Create a new real time handler
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PhysicalTimeEffects for RealTimeHandler {
    async fn physical_time(&self) -> Result<Timestamp, TimeError> {
        Ok(Timestamp::now())
    }

    async fn sleep_ms(&self, ms: u64) -> Result<(), TimeError> {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok(())
    }
}
