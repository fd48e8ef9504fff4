//! Request and response shapes for the chat endpoints.
//!
//! Messages go over the wire as `pollchat_core::ChatMessage` directly.

use pollchat_core::MessageId;
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;

/// Raw `key=value` pairs of a query string, in order. Decoding into pairs
/// cannot fail on repeated keys, unlike a derived struct.
pub type QueryPairs = Vec<(String, String)>;

/// First value for `key`, or `None` when the key is absent.
fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// `?name=` on /join and /leave
#[derive(Debug, Default)]
pub struct NameParams {
    pub name: Option<String>,
}

impl NameParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            name: first(pairs, "name").map(str::to_string),
        }
    }

    /// The name, or "" when absent. Emptiness is checked by the chat state.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// `?lastId=` on /messages
#[derive(Debug, Default)]
pub struct PollParams {
    pub last_id: Option<String>,
}

impl PollParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            last_id: first(pairs, "lastId").map(str::to_string),
        }
    }

    /// Poll cursor. Absent, non-numeric and negative values all mean
    /// "from the beginning"; numbers too large for `i64` clamp to the end.
    pub fn cursor(&self) -> MessageId {
        let Some(raw) = self.last_id.as_deref() else {
            return MessageId::ZERO;
        };
        let id = match raw.parse::<i64>() {
            Ok(id) => id,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
            Err(_) => 0,
        };
        if id > 0 {
            MessageId::new(id as u64)
        } else {
            MessageId::ZERO
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub last_id: MessageId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll(raw: Option<&str>) -> MessageId {
        PollParams {
            last_id: raw.map(str::to_string),
        }
        .cursor()
    }

    #[test]
    fn cursor_parsing() {
        assert_eq!(poll(None), MessageId::ZERO);
        assert_eq!(poll(Some("")), MessageId::ZERO);
        assert_eq!(poll(Some("abc")), MessageId::ZERO);
        assert_eq!(poll(Some("-4")), MessageId::ZERO);
        assert_eq!(poll(Some("12")), MessageId::new(12));
        assert_eq!(poll(Some("+3")), MessageId::new(3));
    }

    #[test]
    fn cursor_clamps_overflow() {
        assert_eq!(
            poll(Some("99999999999999999999")),
            MessageId::new(i64::MAX as u64)
        );
        assert_eq!(poll(Some("-99999999999999999999")), MessageId::ZERO);
    }

    fn pairs(raw: &[(&str, &str)]) -> QueryPairs {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn repeated_keys_take_first_value() {
        let params = PollParams::from_pairs(&pairs(&[("lastId", "2"), ("lastId", "9")]));
        assert_eq!(params.cursor(), MessageId::new(2));

        let params = NameParams::from_pairs(&pairs(&[("other", "x"), ("name", "a"), ("name", "b")]));
        assert_eq!(params.name(), "a");

        assert_eq!(PollParams::from_pairs(&[]).cursor(), MessageId::ZERO);
        assert_eq!(NameParams::from_pairs(&[]).name(), "");
    }

    #[test]
    fn join_response_uses_camel_case() {
        let body = serde_json::to_string(&JoinResponse {
            last_id: MessageId::new(7),
        })
        .unwrap();
        assert_eq!(body, r#"{"lastId":7}"#);
    }

    #[test]
    fn missing_name_reads_as_empty() {
        assert_eq!(NameParams::default().name(), "");
    }
}
