//! Message handlers: join, send, poll, leave.
//!
//! Each handler makes exactly one call into `ChatState`, so each request is
//! one critical section.

use crate::chat::models::{JoinResponse, NameParams, PollParams, QueryPairs};
use crate::core::{AppState, Error, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use pollchat_core::{ChatMessage, NewMessage};
use tracing::{info, warn};

/// GET /join?name=
pub async fn join(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<JoinResponse>> {
    let params = NameParams::from_pairs(&pairs);
    let name = params.name();
    info!("GET /join name={:?}", name);

    let last_id = state.chat.join(name).map_err(|e| {
        warn!("join rejected: {}", e);
        Error::from(e)
    })?;

    Ok(Json(JoinResponse { last_id }))
}

/// POST /send
///
/// The body is decoded as JSON whatever its content type.
pub async fn send(State(state): State<AppState>, body: Bytes) -> Result<StatusCode> {
    let message = NewMessage::from_json(&body).map_err(|e| {
        warn!("POST /send rejected: {}", e);
        Error::from(e)
    })?;

    let stored = state.chat.send(message);
    info!("POST /send name={:?} id={}", stored.sender, stored.id);

    Ok(StatusCode::OK)
}

/// GET /messages?lastId=
pub async fn get_messages(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Json<Vec<ChatMessage>> {
    let since = PollParams::from_pairs(&pairs).cursor();
    let messages = state.chat.query(since);
    info!("GET /messages lastId={} -> {}", since, messages.len());
    Json(messages)
}

/// GET|POST /leave?name=
pub async fn leave(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<StatusCode> {
    let params = NameParams::from_pairs(&pairs);
    let name = params.name();
    info!("/leave name={:?}", name);

    state.chat.leave(name).map_err(|e| {
        warn!("leave rejected: {}", e);
        Error::from(e)
    })?;

    Ok(StatusCode::OK)
}
