//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    domain::RoomId,
    infrastructure::dto::http::RoomSnapshotDto,
    ui::{error::ApiError, state::AppState},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint: live state of one room
pub async fn debug_room_state(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomSnapshotDto>, ApiError> {
    let room_id = RoomId::new(room_id).map_err(|_| ApiError::not_found("Room not found"))?;
    let snapshot = state
        .session
        .room_snapshot(&room_id)
        .await
        .ok_or_else(|| ApiError::not_found("Room not found"))?;

    // Domain Model から DTO への変換
    Ok(Json(snapshot.into()))
}
