//! HTTP error responses.
//!
//! Every error is rendered as `{"detail": "<message>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    infrastructure::dto::http::ErrorResponse,
    usecase::{AccountError, RoomError},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {detail}")]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    fn internal(cause: &str) -> Self {
        tracing::error!("Internal error: {}", cause);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(error: AccountError) -> Self {
        match error {
            AccountError::InvalidInput(_)
            | AccountError::EmailTaken
            | AccountError::UsernameTaken => Self::new(StatusCode::BAD_REQUEST, error.to_string()),
            AccountError::InvalidCredentials | AccountError::Unauthorized => {
                Self::unauthorized(error.to_string())
            }
            AccountError::Internal(cause) => Self::internal(&cause),
        }
    }
}

impl From<RoomError> for ApiError {
    fn from(error: RoomError) -> Self {
        match error {
            RoomError::InvalidInput(_) => Self::new(StatusCode::BAD_REQUEST, error.to_string()),
            RoomError::NotFound => Self::not_found(error.to_string()),
            RoomError::Internal(cause) => Self::internal(&cause),
        }
    }
}
