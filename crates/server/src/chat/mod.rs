//! Chat Service Layer
//!
//! HTTP surface of the polling chat: message and presence routes over the
//! shared `pollchat_core::ChatState`.

pub mod handlers;
pub mod models;

pub use handlers::router;
