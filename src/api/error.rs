use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::{AuthError, BriefingError, OpsError, ShiftError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    ValidationError(String),

    Conflict(String),

    InternalError(String),

    Unauthorized(String),

    Forbidden(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            Self::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UnknownIdentity | AuthError::InvalidPin => {
                Self::Unauthorized(err.to_string())
            }
            AuthError::Validation(msg) => Self::ValidationError(msg),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Session(msg) | AuthError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<ShiftError> for ApiError {
    fn from(err: ShiftError) -> Self {
        match err {
            ShiftError::Validation(msg) => Self::ValidationError(msg),
            ShiftError::NotFound(_) => Self::NotFound(err.to_string()),
            ShiftError::AlreadyOpen(_) | ShiftError::NotOpen => Self::Conflict(err.to_string()),
            ShiftError::Database(msg) => Self::DatabaseError(msg),
            ShiftError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<BriefingError> for ApiError {
    fn from(err: BriefingError) -> Self {
        match err {
            BriefingError::Validation(msg) => Self::ValidationError(msg),
            BriefingError::Forbidden(msg) => Self::Forbidden(msg),
            BriefingError::NotFound(_) => Self::NotFound(err.to_string()),
            BriefingError::Database(msg) => Self::DatabaseError(msg),
            BriefingError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<OpsError> for ApiError {
    fn from(err: OpsError) -> Self {
        match err {
            OpsError::Validation(msg) => Self::ValidationError(msg),
            OpsError::Forbidden(msg) => Self::Forbidden(msg),
            OpsError::NotFound(_) => Self::NotFound(err.to_string()),
            OpsError::NoOpenShift => Self::Conflict(err.to_string()),
            OpsError::Database(msg) => Self::DatabaseError(msg),
            OpsError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized("Not authenticated".to_string())
    }
}
