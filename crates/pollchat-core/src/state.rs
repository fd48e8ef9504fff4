//! The single critical section every chat operation runs in.

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::{ChatError, Result};
use crate::log::MessageLog;
use crate::message::{ChatMessage, MessageId, NewMessage, SYSTEM_SENDER};
use crate::presence::PresenceRegistry;

struct Inner {
    log: MessageLog,
    presence: PresenceRegistry,
}

/// Counters reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatStats {
    pub messages: usize,
    pub last_id: MessageId,
    pub known_names: usize,
    pub active_names: usize,
}

/// Message log and presence registry behind one mutex.
///
/// Reads and writes take the same lock, so every operation observes and
/// leaves behind a consistent log/registry pair, and ids come out in the
/// order the lock was acquired. The clock is read while the lock is held.
pub struct ChatState {
    inner: Mutex<Inner>,
    clock: Arc<dyn Clock>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                log: MessageLog::new(),
                presence: PresenceRegistry::new(),
            }),
            clock,
        }
    }

    /// Replace the presence timeout. Only valid before the state is shared;
    /// stored entries keep their timestamps.
    #[must_use]
    pub fn presence_timeout(mut self, timeout: TimeDelta) -> Self {
        let inner = self.inner.get_mut();
        inner.presence = PresenceRegistry::with_timeout(timeout);
        self
    }

    /// Mark `name` active and announce it. Returns the id of the
    /// announcement, which the client can use as its first poll cursor.
    pub fn join(&self, name: &str) -> Result<MessageId> {
        require_name(name)?;

        let mut inner = self.inner.lock();
        let now = self.clock.now();
        inner.presence.mark_active(name, now);
        let notice = inner
            .log
            .append(SYSTEM_SENDER, format!("{name} joined the chat"), now);
        debug!(name, id = %notice.id, "joined");
        Ok(notice.id)
    }

    /// Append a client message and refresh the sender's presence, whether or
    /// not the sender ever joined.
    pub fn send(&self, message: NewMessage) -> ChatMessage {
        let NewMessage { name, content } = message;

        let mut inner = self.inner.lock();
        let now = self.clock.now();
        let stored = inner.log.append(name, content, now);
        inner.presence.mark_active(&stored.sender, now);
        stored
    }

    /// Messages newer than `since`, oldest first.
    #[must_use]
    pub fn query(&self, since: MessageId) -> Vec<ChatMessage> {
        self.inner.lock().log.query(since)
    }

    /// Forget `name` and announce the departure. Names that were never
    /// present are announced too.
    pub fn leave(&self, name: &str) -> Result<MessageId> {
        require_name(name)?;

        let mut inner = self.inner.lock();
        let now = self.clock.now();
        let was_present = inner.presence.remove(name);
        let notice = inner
            .log
            .append(SYSTEM_SENDER, format!("{name} left the chat"), now);
        debug!(name, was_present, id = %notice.id, "left");
        Ok(notice.id)
    }

    /// Names active right now according to the state's clock.
    #[must_use]
    pub fn list_active(&self) -> Vec<String> {
        let inner = self.inner.lock();
        let now = self.clock.now();
        inner.presence.list_active(now)
    }

    /// Names active at an explicit instant.
    #[must_use]
    pub fn list_active_at(&self, now: DateTime<Utc>) -> Vec<String> {
        self.inner.lock().presence.list_active(now)
    }

    #[must_use]
    pub fn stats(&self) -> ChatStats {
        let inner = self.inner.lock();
        let now = self.clock.now();
        ChatStats {
            messages: inner.log.len(),
            last_id: inner.log.last_id(),
            known_names: inner.presence.len(),
            active_names: inner.presence.list_active(now).len(),
        }
    }
}

fn require_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ChatError::MissingParameter("name"));
    }
    Ok(())
}
