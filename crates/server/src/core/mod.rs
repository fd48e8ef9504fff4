//! Core Service Layer
//!
//! Shared infrastructure for the chat server: configuration, application
//! state, HTTP error mapping and the health route.

pub mod config;
pub mod error;
pub mod router;

// Re-exports for convenience
pub use config::{AppState, ServerConfig};
pub use error::{Error, Result};
pub use router::router;
