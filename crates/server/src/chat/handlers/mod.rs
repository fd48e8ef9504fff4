//! Chat Handlers and Router
//!
//! Orchestrates messaging and presence routes.

use crate::core::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub mod chat;
pub mod presence;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/join", get(chat::join))
        .route("/send", post(chat::send))
        .route("/messages", get(chat::get_messages))
        // The browser client leaves with POST
        .route("/leave", get(chat::leave).post(chat::leave))
        .route("/users", get(presence::list_users))
}
