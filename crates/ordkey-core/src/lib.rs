//! ordkey Core - Value Types and Effect Interfaces
//!
//! This crate holds the pieces every other ordkey crate agrees on: the
//! timestamped entry posted to a channel, the identifiers used to recognise
//! entries and participants, the unified error type, protocol configuration,
//! and the effect traits through which time and randomness are injected.
//!
//! It contains no handlers and no protocol logic. Real and deterministic
//! handlers live in `ordkey-effects`; the channel and participants live in
//! `ordkey-protocol`.

#![forbid(unsafe_code)]

/// Protocol configuration (defaults, TOML, environment overrides)
pub mod config;

/// Pure effect interfaces (no implementations)
pub mod effects;

/// Unified error handling
pub mod errors;

/// Entry and participant identifiers
pub mod identifiers;

/// Timestamped channel entries
pub mod message;

/// Microsecond-resolution wall-clock timestamps
pub mod time;

pub use config::{ConfigValidation, ProtocolConfig};
pub use effects::{PhysicalTimeEffects, ProtocolEffects, RandomEffects, TimeError};
pub use errors::{OrdkeyError, Result};
pub use identifiers::{EntryId, ParticipantId};
pub use message::Message;
pub use time::Timestamp;
