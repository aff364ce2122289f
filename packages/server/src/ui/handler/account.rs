//! Account endpoints: `/api/auth/*`

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{LoginRequest, RegisterRequest, TokenResponse},
    ui::{error::ApiError, state::AppState},
};

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let session = state
        .register_user_usecase
        .execute(request.username, request.email, request.password)
        .await?;
    Ok(Json(session.into()))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let session = state
        .login_usecase
        .execute(request.email, request.password)
        .await?;
    Ok(Json(session.into()))
}
