/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Bounded replay history of sent messages.
//!
//! The engine records every message it sends, keyed by sequence number, so a
//! peer ResendRequest can be satisfied. Application entries keep the full
//! message and its original SendingTime; administrative entries keep only
//! the marker, since they are replayed as a single SequenceReset-GapFill.
//! Eviction is FIFO once the bound is exceeded, so the buffer always holds
//! the most recent N entries.

use ferrofix_core::message::Message;
use ferrofix_core::types::UtcTimestamp;
use std::collections::VecDeque;

/// One recorded outbound message.
#[derive(Debug, Clone)]
pub struct SentEntry {
    /// Sequence number the message was sent with.
    pub seq: u64,
    /// The message as sent (header fields included).
    pub message: Message,
    /// SendingTime stamped on the original transmission.
    pub sending_time: UtcTimestamp,
    /// Whether this was an administrative message.
    pub admin: bool,
}

/// Bounded FIFO of recently sent messages, keyed by sequence number.
#[derive(Debug)]
pub struct ReplayBuffer {
    capacity: usize,
    entries: VecDeque<SentEntry>,
}

impl ReplayBuffer {
    /// Creates a buffer holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity.min(64)),
        }
    }

    /// Records a sent message, evicting the oldest entry when full.
    pub fn record(&mut self, seq: u64, message: Message, sending_time: UtcTimestamp, admin: bool) {
        self.entries.push_back(SentEntry {
            seq,
            message,
            sending_time,
            admin,
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Returns the entry for a sequence number, if still held.
    #[must_use]
    pub fn get(&self, seq: u64) -> Option<&SentEntry> {
        // Entries are appended in ascending sequence order.
        self.entries
            .binary_search_by_key(&seq, |e| e.seq)
            .ok()
            .and_then(|i| self.entries.get(i))
    }

    /// Returns the oldest held sequence number.
    #[must_use]
    pub fn oldest(&self) -> Option<u64> {
        self.entries.front().map(|e| e.seq)
    }

    /// Returns the newest held sequence number.
    #[must_use]
    pub fn latest(&self) -> Option<u64> {
        self.entries.back().map(|e| e.seq)
    }

    /// Returns the number of held entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the configured bound.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops everything, e.g. on a sequence reset.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrofix_core::message::MsgType;

    fn entry_message() -> Message {
        Message::new(MsgType::NewOrderSingle)
    }

    fn now() -> UtcTimestamp {
        UtcTimestamp::from_millis(1_577_836_800_000)
    }

    #[test]
    fn test_record_and_get() {
        let mut buffer = ReplayBuffer::new(8);
        buffer.record(1, entry_message(), now(), true);
        buffer.record(2, entry_message(), now(), false);

        assert_eq!(buffer.len(), 2);
        assert!(buffer.get(1).unwrap().admin);
        assert!(!buffer.get(2).unwrap().admin);
        assert!(buffer.get(3).is_none());
    }

    #[test]
    fn test_fifo_eviction_keeps_most_recent() {
        let mut buffer = ReplayBuffer::new(3);
        for seq in 1..=5 {
            buffer.record(seq, entry_message(), now(), false);
        }

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.oldest(), Some(3));
        assert_eq!(buffer.latest(), Some(5));
        assert!(buffer.get(1).is_none());
        assert!(buffer.get(2).is_none());
        assert!(buffer.get(4).is_some());
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut buffer = ReplayBuffer::new(10);
        for seq in 1..=100 {
            buffer.record(seq, entry_message(), now(), false);
            assert!(buffer.len() <= 10);
        }
        assert_eq!(buffer.oldest(), Some(91));
    }

    #[test]
    fn test_clear() {
        let mut buffer = ReplayBuffer::new(4);
        buffer.record(1, entry_message(), now(), false);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.oldest(), None);
    }

    #[test]
    fn test_sending_time_preserved() {
        let mut buffer = ReplayBuffer::new(4);
        let stamp = now();
        buffer.record(7, entry_message(), stamp, false);
        assert_eq!(buffer.get(7).unwrap().sending_time, stamp);
    }
}
