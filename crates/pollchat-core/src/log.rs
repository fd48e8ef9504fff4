//! Append-only message log.

use chrono::{DateTime, Utc};

use crate::message::{ChatMessage, MessageId};

/// Messages in insertion order. Ids are handed out here and nowhere else, so
/// the stored ids are always exactly `1..=len`.
///
/// Not synchronized on its own; [`crate::ChatState`] owns the lock.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Vec<ChatMessage>,
    next_id: MessageId,
}

impl MessageLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a message and return a copy of what was stored.
    pub fn append(
        &mut self,
        sender: impl Into<String>,
        body: impl Into<String>,
        now: DateTime<Utc>,
    ) -> ChatMessage {
        self.next_id = self.next_id.next();
        let message = ChatMessage {
            id: self.next_id,
            sender: sender.into(),
            body: body.into(),
            created_at: now,
        };
        self.messages.push(message.clone());
        message
    }

    /// Every message with an id greater than `since`, oldest first.
    #[must_use]
    pub fn query(&self, since: MessageId) -> Vec<ChatMessage> {
        self.since(since).to_vec()
    }

    fn since(&self, since: MessageId) -> &[ChatMessage] {
        let start = self.messages.partition_point(|m| m.id <= since);
        &self.messages[start..]
    }

    /// Id of the most recent message, or [`MessageId::ZERO`] if empty.
    #[must_use]
    pub fn last_id(&self) -> MessageId {
        self.next_id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> MessageLog {
        let mut log = MessageLog::new();
        let now = Utc::now();
        for i in 0..n {
            log.append("alice", format!("msg {i}"), now);
        }
        log
    }

    #[test]
    fn append_numbers_from_one() {
        let mut log = MessageLog::new();
        assert!(log.is_empty());
        assert_eq!(log.last_id(), MessageId::ZERO);

        let first = log.append("alice", "hi", Utc::now());
        let second = log.append("bob", "yo", Utc::now());

        assert_eq!(first.id, MessageId::new(1));
        assert_eq!(second.id, MessageId::new(2));
        assert_eq!(log.last_id(), MessageId::new(2));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn append_returns_stored_copy() {
        let mut log = MessageLog::new();
        let now = Utc::now();
        let stored = log.append("alice", "hi", now);
        assert_eq!(stored.created_at, now);
        assert_eq!(log.query(MessageId::ZERO), vec![stored]);
    }

    #[test]
    fn query_returns_strictly_newer_in_order() {
        let log = filled(5);

        let ids: Vec<u64> = log.query(MessageId::new(2)).iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![3, 4, 5]);

        assert_eq!(log.query(MessageId::ZERO).len(), 5);
        assert!(log.query(MessageId::new(5)).is_empty());
        assert!(log.query(MessageId::new(500)).is_empty());
    }

    #[test]
    fn query_on_empty_log() {
        let log = MessageLog::new();
        assert!(log.query(MessageId::ZERO).is_empty());
        assert!(log.query(MessageId::new(7)).is_empty());
    }

    #[test]
    fn query_is_repeatable() {
        let log = filled(4);
        assert_eq!(log.query(MessageId::new(1)), log.query(MessageId::new(1)));
    }
}
