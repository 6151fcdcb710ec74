//! Pure effect interfaces
//!
//! Protocol code never touches the system clock, `tokio::time` or a global
//! RNG directly. It asks an effect handler instead, which lets the same
//! generation loop run against real time or a deterministic simulation.
//!
//! - **Time**: [`PhysicalTimeEffects`]
//! - **Random**: [`RandomEffects`]
//!
//! Handlers live in `ordkey-effects`.

pub mod random;
pub mod supertraits;
pub mod time;

pub use random::RandomEffects;
pub use supertraits::ProtocolEffects;
pub use time::{PhysicalTimeEffects, TimeError};
