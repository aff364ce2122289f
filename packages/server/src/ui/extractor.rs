//! Request extractors.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::domain::UserAccount;

use super::{error::ApiError, state::AppState};

/// The account behind the request's `Authorization: Bearer <token>` header.
///
/// Missing or malformed headers, bad tokens and deleted accounts are all
/// rejected with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserAccount);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

        let account = state.authenticate_usecase.execute(token.trim()).await?;
        Ok(CurrentUser(account))
    }
}
