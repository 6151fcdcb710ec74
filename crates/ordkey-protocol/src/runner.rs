//! Protocol runner
//!
//! Runs both generation phases concurrently against one channel, brackets
//! them with a common window, and extracts and compares both secrets over
//! that window.

use crate::channel::Channel;
use crate::participant::Participant;
use ordkey_core::{ProtocolEffects, Result, Timestamp};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of one protocol round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolOutcome {
    /// Time taken before either participant started
    pub start: Timestamp,
    /// Time taken after both participants finished
    pub end: Timestamp,
    /// Entries inside `[start, end]`
    pub entry_count: usize,
    /// Secret extracted by the first participant
    pub first_secret: String,
    /// Secret extracted by the second participant
    pub second_secret: String,
    /// Whether the two secrets are identical
    pub secrets_match: bool,
}

/// Run both generation phases concurrently and return the window
/// `(start, end)` that spans them.
pub async fn generate_secret<E>(
    effects: &E,
    first: &mut Participant,
    second: &mut Participant,
    channel: &Channel,
    duration: Duration,
) -> Result<(Timestamp, Timestamp)>
where
    E: ProtocolEffects + ?Sized,
{
    let first_id = first.identity().clone();
    let second_id = second.identity().clone();

    let start = effects.physical_time().await?;
    let (first_run, second_run) = tokio::join!(
        first.generate(effects, &second_id, channel, duration),
        second.generate(effects, &first_id, channel, duration),
    );
    first_run?;
    second_run?;
    let end = effects.physical_time().await?;

    Ok((start, end))
}

/// Run a full round: generation, then extraction for both participants over
/// the same window.
///
/// Differing secrets are reported through
/// [`ProtocolOutcome::secrets_match`], not as an error.
pub async fn run_protocol<E>(
    effects: &E,
    first: &mut Participant,
    second: &mut Participant,
    channel: &Channel,
    duration: Duration,
) -> Result<ProtocolOutcome>
where
    E: ProtocolEffects + ?Sized,
{
    let (start, end) = generate_secret(effects, first, second, channel, duration).await?;

    let first_secret = first.extract(channel, start, end);
    let second_secret = second.extract(channel, start, end);
    let secrets_match = first_secret == second_secret;

    let outcome = ProtocolOutcome {
        start,
        end,
        entry_count: first_secret.len(),
        first_secret,
        second_secret,
        secrets_match,
    };
    tracing::info!(
        channel = channel.name(),
        first = %first.identity(),
        second = %second.identity(),
        entries = outcome.entry_count,
        secrets_match,
        "protocol round complete"
    );
    Ok(outcome)
}
