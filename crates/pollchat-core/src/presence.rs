//! Who is around.
//!
//! Entries are written on join and send and deleted on leave. Expiry is a
//! filter applied when listing: a stale entry stays stored and simply stops
//! being reported until the name shows activity again.

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;

/// Seconds of inactivity after which a stored name is no longer listed.
pub const PRESENCE_TIMEOUT_SECS: i64 = 5 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceEntry {
    pub name: String,
    pub last_seen_at: DateTime<Utc>,
}

/// Name -> last activity. Not synchronized on its own.
#[derive(Debug)]
pub struct PresenceRegistry {
    entries: HashMap<String, PresenceEntry>,
    timeout: TimeDelta,
}

impl Default for PresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PresenceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(TimeDelta::seconds(PRESENCE_TIMEOUT_SECS))
    }

    #[must_use]
    pub fn with_timeout(timeout: TimeDelta) -> Self {
        Self {
            entries: HashMap::new(),
            timeout,
        }
    }

    #[must_use]
    pub fn timeout(&self) -> TimeDelta {
        self.timeout
    }

    /// Insert or overwrite the entry for `name`.
    pub fn mark_active(&mut self, name: &str, now: DateTime<Utc>) {
        self.entries.insert(
            name.to_string(),
            PresenceEntry {
                name: name.to_string(),
                last_seen_at: now,
            },
        );
    }

    /// Drop the entry for `name`. Returns whether one existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PresenceEntry> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn is_active(&self, name: &str, now: DateTime<Utc>) -> bool {
        self.entries
            .get(name)
            .is_some_and(|entry| self.within_timeout(entry, now))
    }

    /// Names active at `now`, sorted. Callers should not rely on the order.
    #[must_use]
    pub fn list_active(&self, now: DateTime<Utc>) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .values()
            .filter(|entry| self.within_timeout(entry, now))
            .map(|entry| entry.name.clone())
            .collect();
        names.sort_unstable();
        names
    }

    /// Stored entries, including ones that have timed out.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn within_timeout(&self, entry: &PresenceEntry, now: DateTime<Utc>) -> bool {
        now - entry.last_seen_at < self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_active_then_listed() {
        let now = Utc::now();
        let mut registry = PresenceRegistry::new();
        registry.mark_active("alice", now);
        registry.mark_active("bob", now);

        assert_eq!(registry.list_active(now), vec!["alice", "bob"]);
        assert!(registry.is_active("alice", now));
    }

    #[test]
    fn timeout_boundary_is_exclusive() {
        let start = Utc::now();
        let mut registry = PresenceRegistry::new();
        registry.mark_active("alice", start);

        let almost = start + TimeDelta::seconds(PRESENCE_TIMEOUT_SECS) - TimeDelta::milliseconds(1);
        assert_eq!(registry.list_active(almost), vec!["alice"]);

        let exactly = start + TimeDelta::seconds(PRESENCE_TIMEOUT_SECS);
        assert!(registry.list_active(exactly).is_empty());
        assert!(!registry.is_active("alice", exactly));

        // Still stored, just not reported.
        assert_eq!(registry.len(), 1);
        assert!(registry.get("alice").is_some());
    }

    #[test]
    fn activity_refreshes_stale_entry() {
        let start = Utc::now();
        let later = start + TimeDelta::minutes(10);
        let mut registry = PresenceRegistry::new();
        registry.mark_active("alice", start);
        assert!(registry.list_active(later).is_empty());

        registry.mark_active("alice", later);
        assert_eq!(registry.list_active(later), vec!["alice"]);
        assert_eq!(registry.get("alice").unwrap().last_seen_at, later);
    }

    #[test]
    fn remove_is_idempotent() {
        let now = Utc::now();
        let mut registry = PresenceRegistry::new();
        registry.mark_active("alice", now);

        assert!(registry.remove("alice"));
        assert!(!registry.remove("alice"));
        assert!(!registry.remove("nobody"));
        assert!(registry.is_empty());
        assert!(registry.list_active(now).is_empty());
    }

    #[test]
    fn custom_timeout() {
        let start = Utc::now();
        let mut registry = PresenceRegistry::with_timeout(TimeDelta::seconds(10));
        registry.mark_active("alice", start);
        assert!(registry.is_active("alice", start + TimeDelta::seconds(9)));
        assert!(!registry.is_active("alice", start + TimeDelta::seconds(10)));
    }
}
