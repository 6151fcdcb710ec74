//! ordkey Protocol - Secret Derivation from Posting Order
//!
//! Two participants post anonymous entries to one shared, timestamp-ordered
//! [`Channel`]. Each repeatedly picks at random whether to post its own name
//! or its peer's. Afterwards each replays the same window of the channel and
//! derives a bit per entry from whether the entry's claim matches what that
//! participant actually posted.
//!
//! ```ignore
//! let effects = CompositeHandler::for_production();
//! let channel = Channel::default();
//! let mut alice = Participant::new("Alice");
//! let mut bob = Participant::new("Bob");
//! let outcome = run_protocol(&effects, &mut alice, &mut bob, &channel, duration).await?;
//! println!("{}", outcome.secrets_match);
//! ```

#![forbid(unsafe_code)]

pub mod channel;
pub mod participant;
pub mod runner;

pub use channel::{Channel, DEFAULT_CHANNEL_NAME};
pub use participant::{GenerationParams, Participant};
pub use runner::{generate_secret, run_protocol, ProtocolOutcome};
