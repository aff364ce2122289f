//! Room endpoints: `/api/rooms/*`. All of them require a bearer token.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{CreateRoomRequest, JoinRoomRequest, RoomDto},
    ui::{error::ApiError, extractor::CurrentUser, state::AppState},
};

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateRoomRequest>,
) -> Result<Json<RoomDto>, ApiError> {
    let room = state
        .create_room_usecase
        .execute(&user.id, request.name)
        .await?;
    Ok(Json(room.into()))
}

pub async fn join_room(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<JoinRoomRequest>,
) -> Result<Json<RoomDto>, ApiError> {
    let room = state
        .join_room_usecase
        .execute(&user.id, request.room_code)
        .await?;
    Ok(Json(room.into()))
}

pub async fn my_rooms(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<RoomDto>>, ApiError> {
    let rooms = state.list_my_rooms_usecase.execute(&user.id).await?;
    Ok(Json(rooms.into_iter().map(Into::into).collect()))
}
