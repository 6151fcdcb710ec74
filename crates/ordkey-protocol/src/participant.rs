//! Protocol participants
//!
//! A participant posts anonymously to a shared [`Channel`] during the
//! generation phase, remembering the handle of every entry it posts. During
//! extraction it walks a window of the channel and emits one bit per entry:
//! `'0'` when the entry's claim agrees with authorship from this
//! participant's point of view, `'1'` otherwise.
//!
//! "Authorship" is decided by handle, never by content: an entry this
//! participant posted with the peer's name and an entry the peer posted with
//! the peer's name have identical content but different handles.

use crate::channel::Channel;
use ordkey_core::{EntryId, Message, ParticipantId, ProtocolEffects, Result, Timestamp};
use std::collections::HashSet;
use std::time::Duration;

/// Bounds of the random pause before each post, in milliseconds (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    /// Shortest pause
    pub min_sleep_ms: u64,
    /// Longest pause
    pub max_sleep_ms: u64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            min_sleep_ms: 1,
            max_sleep_ms: 10,
        }
    }
}

/// One of the two protocol actors
#[derive(Debug, Clone)]
pub struct Participant {
    identity: ParticipantId,
    self_posted: HashSet<EntryId>,
    params: GenerationParams,
}

impl Participant {
    /// Create a participant posting under `identity`
    pub fn new(identity: impl Into<ParticipantId>) -> Self {
        Self::with_params(identity, GenerationParams::default())
    }

    /// Create a participant with custom pause bounds
    pub fn with_params(identity: impl Into<ParticipantId>, params: GenerationParams) -> Self {
        Self {
            identity: identity.into(),
            self_posted: HashSet::new(),
            params,
        }
    }

    /// Name this participant posts under
    pub fn identity(&self) -> &ParticipantId {
        &self.identity
    }

    /// Pause bounds used by [`Participant::generate`]
    pub fn params(&self) -> GenerationParams {
        self.params
    }

    /// Whether this participant posted the entry with handle `id`
    pub fn has_posted(&self, id: &EntryId) -> bool {
        self.self_posted.contains(id)
    }

    /// Number of entries this participant has posted
    pub fn posted_count(&self) -> usize {
        self.self_posted.len()
    }

    /// Append `content` to `channel` and record the entry as self-posted
    pub fn post(
        &mut self,
        channel: &Channel,
        content: impl Into<String>,
        timestamp: Option<Timestamp>,
    ) -> Message {
        let message = channel.append(content, timestamp);
        self.self_posted.insert(message.id());
        message
    }

    /// Generation phase.
    ///
    /// Until `duration` has elapsed (deadline fixed on entry): pause for a
    /// random number of milliseconds within [`GenerationParams`], then flip a
    /// coin and post either this participant's own name or `peer`'s.
    pub async fn generate<E>(
        &mut self,
        effects: &E,
        peer: &ParticipantId,
        channel: &Channel,
        duration: Duration,
    ) -> Result<()>
    where
        E: ProtocolEffects + ?Sized,
    {
        let deadline = effects.physical_time().await?.checked_add(duration)?;
        let posted_before = self.posted_count();
        tracing::debug!(
            participant = %self.identity,
            %peer,
            channel = channel.name(),
            %deadline,
            "generation started"
        );

        while effects.physical_time().await? < deadline {
            let pause = effects
                .random_range(self.params.min_sleep_ms, self.params.max_sleep_ms)
                .await;
            effects.sleep_ms(pause).await?;

            let content = if effects.random_bit().await {
                peer.as_str().to_owned()
            } else {
                self.identity.as_str().to_owned()
            };
            let now = effects.physical_time().await?;
            self.post(channel, content, Some(now));
        }

        tracing::debug!(
            participant = %self.identity,
            posted = self.posted_count() - posted_before,
            "generation finished"
        );
        Ok(())
    }

    /// Extraction phase: one bit per entry of `channel` in `[start, end]`.
    pub fn extract(&self, channel: &Channel, start: Timestamp, end: Timestamp) -> String {
        channel
            .range_query(start, end)
            .iter()
            .map(|message| self.bit_for(message))
            .collect()
    }

    fn bit_for(&self, message: &Message) -> char {
        let claimed = message.content() == self.identity.as_str();
        let mine = self.has_posted(&message.id());
        if claimed == mine {
            '0'
        } else {
            '1'
        }
    }
}
