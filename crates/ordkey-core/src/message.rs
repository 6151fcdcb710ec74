//! Timestamped channel entries
//!
//! A [`Message`] is immutable once created. Ordering looks only at the
//! timestamp and the channel-assigned sequence number; content never takes
//! part in comparisons.

use crate::identifiers::EntryId;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One entry posted to a channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    id: EntryId,
    seq: u64,
    content: String,
    timestamp: Timestamp,
}

impl Message {
    /// Create an entry. Channels call this while holding their write lock so
    /// that `seq` reflects arrival order.
    pub fn new(id: EntryId, seq: u64, content: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            id,
            seq,
            content: content.into(),
            timestamp,
        }
    }

    /// Handle identifying this exact entry
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Arrival sequence number within the owning channel
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Posted content (a participant name in the protocol)
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Time the entry was posted
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Message {}

impl PartialOrd for Message {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Message {
    // Equal timestamps fall back to arrival order, then to the handle so that
    // entries from different channels still compare totally.
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then(self.seq.cmp(&other.seq))
            .then(self.id.cmp(&other.id))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.timestamp, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(micros: i64) -> Timestamp {
        Timestamp::from_micros(micros).unwrap()
    }

    #[test]
    fn test_ordering_ignores_content() {
        let early = Message::new(EntryId::new(), 1, "zzz", at(10));
        let late = Message::new(EntryId::new(), 0, "aaa", at(20));
        assert!(early < late);
    }

    #[test]
    fn test_equal_timestamps_break_on_sequence() {
        let first = Message::new(EntryId::new(), 3, "Bob", at(10));
        let second = Message::new(EntryId::new(), 4, "Bob", at(10));
        assert!(first < second);
        assert_ne!(first, second);
    }

    #[test]
    fn test_display() {
        let msg = Message::new(EntryId::new(), 0, "Alice", at(1_500_000));
        assert_eq!(msg.to_string(), "01/01/1970 00:00:01.500000: Alice");
    }
}
