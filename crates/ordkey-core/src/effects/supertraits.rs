//! Supertraits for common effect combinations

use super::{PhysicalTimeEffects, RandomEffects};

/// Everything a participant needs to run the generation phase
///
/// Combines wall-clock time (deadline, sleeps, timestamps) with randomness
/// (sleep jitter, coin flips).
pub trait ProtocolEffects: PhysicalTimeEffects + RandomEffects {
    // Blanket-implemented below; handlers implement the component traits.
}

/// Automatic implementation for types that satisfy the required bounds
impl<T> ProtocolEffects for T where T: PhysicalTimeEffects + RandomEffects {}
