//! Wall-clock timestamps for channel entries
//!
//! Two producers posting every few milliseconds can land within the same
//! millisecond, so timestamps keep (at least) microsecond resolution.

use crate::effects::TimeError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Display format used when dumping a channel: `dd/mm/YYYY HH:MM:SS.ffffff`.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S%.6f";

/// A point in wall-clock time (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Read the system clock.
    ///
    /// Only effect handlers and the channel's default stamping should call
    /// this; protocol code reads time through `PhysicalTimeEffects`.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// The Unix epoch, `01/01/1970 00:00:00`.
    pub fn epoch() -> Self {
        Self(DateTime::<Utc>::default())
    }

    /// Build a timestamp from microseconds since the Unix epoch.
    pub fn from_micros(micros: i64) -> Result<Self, TimeError> {
        DateTime::<Utc>::from_timestamp_micros(micros)
            .map(Self)
            .ok_or_else(|| TimeError::OutOfRange {
                reason: format!("{micros}us since epoch is not representable"),
            })
    }

    /// Microseconds since the Unix epoch.
    pub fn as_micros(&self) -> i64 {
        self.0.timestamp_micros()
    }

    /// `self + duration`, failing if the result leaves chrono's range.
    pub fn checked_add(&self, duration: Duration) -> Result<Self, TimeError> {
        let delta = TimeDelta::from_std(duration).map_err(|e| TimeError::OutOfRange {
            reason: e.to_string(),
        })?;
        self.0
            .checked_add_signed(delta)
            .map(Self)
            .ok_or_else(|| TimeError::OutOfRange {
                reason: format!("{self} + {duration:?} overflows"),
            })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}
