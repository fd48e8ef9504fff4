//! Core Router
//!
//! Shared infrastructure routes that are not part of the chat itself.

use crate::core::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub messages: usize,
    pub last_id: u64,
    pub known_users: usize,
    pub active_users: usize,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.chat.stats();
    Json(HealthResponse {
        status: "ok",
        messages: stats.messages,
        last_id: stats.last_id.get(),
        known_users: stats.known_names,
        active_users: stats.active_names,
    })
}
