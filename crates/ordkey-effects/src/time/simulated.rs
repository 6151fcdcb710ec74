//! Simulated time effect handler for testing and deterministic replays
//!
//! Backed by tokio's paused clock. Sleepers wait on ordinary tokio timers;
//! when every task on the runtime is blocked on a timer, tokio jumps the
//! clock straight to the earliest pending deadline. Concurrent sleeps
//! therefore overlap exactly as they would in real time, and wake order is
//! decided by sleep length, without any wall-clock waiting.
//!
//! The handler must run on a current-thread runtime whose clock is paused
//! (`Builder::start_paused(true)` or `#[tokio::test(start_paused = true)]`).
//! On an unpaused runtime it degrades to real-time sleeps.

use async_trait::async_trait;
use ordkey_core::effects::{PhysicalTimeEffects, TimeError};
use ordkey_core::Timestamp;
use std::time::Duration;
use tokio::time::Instant;

/// Virtual wall clock anchored at a chosen start time
#[derive(Debug, Clone, Copy)]
pub struct SimulatedTimeHandler {
    /// Wall-clock time reported at `origin`
    start: Timestamp,
    /// Runtime instant the handler was created at
    origin: Instant,
}

impl SimulatedTimeHandler {
    /// Create a simulated clock reporting `start` now
    pub fn new(start: Timestamp) -> Self {
        Self {
            start,
            origin: Instant::now(),
        }
    }

    /// Create a simulated clock reporting the Unix epoch now
    pub fn new_at_epoch() -> Self {
        Self::new(Timestamp::epoch())
    }
}

impl Default for SimulatedTimeHandler {
    fn default() -> Self {
        Self::new_at_epoch()
    }
}

#[async_trait]
impl PhysicalTimeEffects for SimulatedTimeHandler {
    async fn physical_time(&self) -> Result<Timestamp, TimeError> {
        self.start
            .checked_add(Instant::now().saturating_duration_since(self.origin))
    }

    async fn sleep_ms(&self, ms: u64) -> Result<(), TimeError> {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok(())
    }
}
