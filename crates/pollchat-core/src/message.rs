use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::Result;

/// Sender name used for join/leave notices generated by the server.
pub const SYSTEM_SENDER: &str = "System";

/// Position of a message in the log. The first message is `1`; `0` means
/// "nothing seen yet" when used as a poll cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    /// Cursor that precedes every message.
    pub const ZERO: MessageId = MessageId(0);

    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u64> for MessageId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored chat message. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    #[serde(rename = "name")]
    pub sender: String,
    #[serde(rename = "content")]
    pub body: String,
    #[serde(rename = "time")]
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.sender == SYSTEM_SENDER
    }
}

/// What a client submits to send a message. Any `id` or `time` it carries
/// is dropped during decoding; the log assigns both.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewMessage {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl NewMessage {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Decode a send payload. Only the `name` field is mandatory.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
