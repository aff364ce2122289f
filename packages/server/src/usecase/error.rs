//! UseCase layer error types.

use thiserror::Error;

use crate::domain::{ConnectionId, ValueObjectError};

/// Errors of the live session core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Malformed join payload; nothing was mutated and nothing was sent
    #[error("invalid join: {0}")]
    InvalidJoin(String),

    /// The connection was never registered (contract violation by the caller)
    #[error("connection '{0}' is not registered")]
    UnknownConnection(ConnectionId),
}

impl From<ValueObjectError> for SessionError {
    fn from(error: ValueObjectError) -> Self {
        SessionError::InvalidJoin(error.to_string())
    }
}

/// Errors of account registration, login and token authentication
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    Unauthorized,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ValueObjectError> for AccountError {
    fn from(error: ValueObjectError) -> Self {
        AccountError::InvalidInput(error.to_string())
    }
}

/// Errors of durable room operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Room not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ValueObjectError> for RoomError {
    fn from(error: ValueObjectError) -> Self {
        RoomError::InvalidInput(error.to_string())
    }
}
