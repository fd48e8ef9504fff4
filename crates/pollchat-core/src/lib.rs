//! pollchat-core: shared state behind the polling chat server.
//!
//! - **log**: append-only, monotonically numbered message log.
//! - **presence**: name -> last activity, with a lazily evaluated timeout.
//! - **state**: the single lock that serializes every chat operation.
//!
//! Nothing in here performs I/O or awaits; the transport crate calls into
//! [`ChatState`] from its handlers and gets a consistent snapshot back.

pub mod clock;
pub mod error;
pub mod log;
pub mod message;
pub mod presence;
pub mod state;

pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::error::{ChatError, Result};
pub use crate::log::MessageLog;
pub use crate::message::{ChatMessage, MessageId, NewMessage, SYSTEM_SENDER};
pub use crate::presence::{PresenceEntry, PresenceRegistry, PRESENCE_TIMEOUT_SECS};
pub use crate::state::{ChatState, ChatStats};
