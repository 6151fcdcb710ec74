//! ordkey Effects - Handler Implementations
//!
//! Implementations of the effect traits declared in `ordkey-core`:
//!
//! - [`RealTimeHandler`] / [`RealRandomHandler`]: system clock, tokio sleeps
//!   and thread-local entropy for live runs.
//! - [`SimulatedTimeHandler`] / [`SeededRandomHandler`]: a shared virtual
//!   clock and a seeded ChaCha stream, so a whole protocol round replays
//!   identically from a seed.
//! - [`CompositeHandler`]: glues one time handler and one random handler into
//!   a single value satisfying `ProtocolEffects`.

#![forbid(unsafe_code)]

pub mod composite;
pub mod random;
pub mod time;

pub use composite::{CompositeHandler, DynProtocolHandler};
pub use random::{RealRandomHandler, SeededRandomHandler};
pub use time::{RealTimeHandler, SimulatedTimeHandler};
