use crate::core::AppState;
use axum::{extract::State, Json};
use tracing::info;

/// GET /users
///
/// Names seen within the presence timeout. Evaluated on every call; stale
/// names stay stored until they leave.
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<String>> {
    let active = state.chat.list_active();
    info!("GET /users -> {} active", active.len());
    Json(active)
}
