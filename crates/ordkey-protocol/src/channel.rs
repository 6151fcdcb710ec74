//! Ordered shared channel
//!
//! Append-only log of [`Message`]s kept in ascending timestamp order. Any
//! number of producers may append concurrently; each append assigns the
//! entry its handle and arrival sequence number and inserts it in order
//! under a single write lock, so readers never observe a partially applied
//! append or an unsorted log.
//!
//! # Equal timestamps
//!
//! Entries with equal timestamps keep arrival order: a new entry is placed
//! after every existing entry whose timestamp is less than or equal to its
//! own. This matches pushing then stable-sorting, and makes repeated queries
//! over an unchanged channel return the same order.

use ordkey_core::{EntryId, Message, Timestamp};
use parking_lot::RwLock;
use std::fmt;

/// Name used when none is given
pub const DEFAULT_CHANNEL_NAME: &str = "one";

#[derive(Debug, Default)]
struct ChannelState {
    entries: Vec<Message>,
    next_seq: u64,
}

/// Named, append-only, timestamp-ordered log shared between participants
#[derive(Debug)]
pub struct Channel {
    name: String,
    state: RwLock<ChannelState>,
}

impl Channel {
    /// Create an empty channel
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(ChannelState::default()),
        }
    }

    /// Channel name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Post `content`, stamped with `timestamp` or with the current time.
    ///
    /// Returns the stored entry, including its handle, so the caller can
    /// recognise it later.
    pub fn append(&self, content: impl Into<String>, timestamp: Option<Timestamp>) -> Message {
        let timestamp = timestamp.unwrap_or_else(Timestamp::now);
        let mut state = self.state.write();

        let message = Message::new(EntryId::new(), state.next_seq, content, timestamp);
        state.next_seq += 1;

        let index = state
            .entries
            .partition_point(|existing| existing.timestamp() <= timestamp);
        state.entries.insert(index, message.clone());

        tracing::trace!(
            channel = %self.name,
            seq = message.seq(),
            %timestamp,
            content = message.content(),
            "appended entry"
        );
        message
    }

    /// Entries with `start <= timestamp <= end`, ascending.
    ///
    /// The result is an independent snapshot. `start > end` yields an empty
    /// vector.
    pub fn range_query(&self, start: Timestamp, end: Timestamp) -> Vec<Message> {
        if start > end {
            return Vec::new();
        }
        let state = self.state.read();
        let lower = state.entries.partition_point(|m| m.timestamp() < start);
        let upper = state.entries.partition_point(|m| m.timestamp() <= end);
        state.entries[lower..upper].to_vec()
    }

    /// Full dump, ascending
    pub fn entries(&self) -> Vec<Message> {
        self.state.read().entries.clone()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Whether nothing has been posted yet
    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// One-line description, e.g. `<Channel one: 12 messages>`
    pub fn summary(&self) -> String {
        format!("<Channel {}: {} messages>", self.name, self.len())
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_NAME)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Channel {}:", self.name)?;
        for message in self.state.read().entries.iter() {
            writeln!(f, "{message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(micros: i64) -> Timestamp {
        Timestamp::from_micros(micros).unwrap()
    }

    #[test]
    fn test_out_of_order_appends_are_sorted() {
        let channel = Channel::default();
        channel.append("c", Some(at(30)));
        channel.append("a", Some(at(10)));
        channel.append("b", Some(at(20)));

        let contents: Vec<_> = channel
            .entries()
            .iter()
            .map(|m| m.content().to_string())
            .collect();
        assert_eq!(contents, ["a", "b", "c"]);
    }

    #[test]
    fn test_equal_timestamps_keep_arrival_order() {
        let channel = Channel::new("ties");
        channel.append("late", Some(at(50)));
        let first = channel.append("Bob", Some(at(10)));
        let second = channel.append("Bob", Some(at(10)));
        let third = channel.append("Alice", Some(at(10)));

        let ids: Vec<_> = channel.entries().iter().map(Message::id).collect();
        assert_eq!(ids[..3], [first.id(), second.id(), third.id()]);
        assert_eq!(channel.entries(), channel.entries());
    }

    #[test]
    fn test_range_is_inclusive() {
        let channel = Channel::default();
        for t in [5, 10, 15, 20, 25] {
            channel.append(t.to_string(), Some(at(t)));
        }

        let hits: Vec<_> = channel
            .range_query(at(10), at(20))
            .iter()
            .map(|m| m.timestamp().as_micros())
            .collect();
        assert_eq!(hits, [10, 15, 20]);
    }

    #[test]
    fn test_empty_ranges() {
        let channel = Channel::default();
        assert!(channel.range_query(at(0), at(100)).is_empty());

        channel.append("x", Some(at(50)));
        assert!(channel.range_query(at(60), at(40)).is_empty());
        assert!(channel.range_query(at(51), at(100)).is_empty());
    }

    #[test]
    fn test_range_is_a_snapshot() {
        let channel = Channel::default();
        channel.append("x", Some(at(1)));
        let snapshot = channel.range_query(at(0), at(10));

        channel.append("y", Some(at(2)));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(channel.range_query(at(0), at(10)).len(), 2);
    }

    #[test]
    fn test_default_timestamp_is_now() {
        let before = Timestamp::now();
        let message = Channel::default().append("Alice", None);
        assert!(message.timestamp() >= before);
    }

    #[test]
    fn test_textual_forms() {
        let channel = Channel::default();
        channel.append("Alice", Some(at(1_000_000)));
        assert_eq!(channel.summary(), "<Channel one: 1 messages>");
        assert_eq!(
            channel.to_string(),
            "Channel one:\n01/01/1970 00:00:01.000000: Alice\n"
        );
    }
}
