//! Error types for session validation and its HTTP surface

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::{context::ContextError, models::UserId};

/// Failure reported by a session or user repository
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No record exists for the requested identifier
    #[error("record not found")]
    NotFound,

    /// The request context was cancelled or ran out of time
    #[error(transparent)]
    Context(#[from] ContextError),

    /// The backing database failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Why a request could not be authenticated
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("no session cookie present")]
    MissingCredential,

    #[error("session cookie is not a valid session id")]
    MalformedCredential,

    #[error("session {0} not found")]
    SessionNotFound(Uuid),

    #[error("session {id} expired at {expired_at}")]
    SessionExpired { id: Uuid, expired_at: DateTime<Utc> },

    #[error("user {0} referenced by session not found")]
    UserNotFound(UserId),

    #[error("repository lookup failed")]
    Repository(#[source] RepositoryError),
}

/// Machine-readable class of a `ValidationError`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    MissingCredential,
    MalformedCredential,
    SessionNotFound,
    SessionExpired,
    UserNotFound,
    RepositoryError,
}

impl ValidationErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::MalformedCredential => "malformed_credential",
            Self::SessionNotFound => "session_not_found",
            Self::SessionExpired => "session_expired",
            Self::UserNotFound => "user_not_found",
            Self::RepositoryError => "repository_error",
        }
    }
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::MissingCredential => ValidationErrorKind::MissingCredential,
            Self::MalformedCredential => ValidationErrorKind::MalformedCredential,
            Self::SessionNotFound(_) => ValidationErrorKind::SessionNotFound,
            Self::SessionExpired { .. } => ValidationErrorKind::SessionExpired,
            Self::UserNotFound(_) => ValidationErrorKind::UserNotFound,
            Self::Repository(_) => ValidationErrorKind::RepositoryError,
        }
    }
}

/// Error returned by HTTP handlers and middleware
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request carries no usable session
    #[error("Unauthorized")]
    Unauthorized(ValidationErrorKind),

    /// The request context was cancelled before validation finished
    #[error("Service unavailable")]
    ServiceUnavailable,

    /// The request deadline elapsed during validation
    #[error("Gateway timeout")]
    GatewayTimeout,

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Repository(RepositoryError::Context(ContextError::Cancelled)) => {
                ApiError::ServiceUnavailable
            }
            ValidationError::Repository(RepositoryError::Context(
                ContextError::DeadlineExceeded,
            )) => ApiError::GatewayTimeout,
            ValidationError::Repository(_) => ApiError::InternalServerError,
            other => ApiError::Unauthorized(other.kind()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            ApiError::Unauthorized(kind) => (StatusCode::UNAUTHORIZED, *kind),
            ApiError::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ValidationErrorKind::RepositoryError,
            ),
            ApiError::GatewayTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                ValidationErrorKind::RepositoryError,
            ),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ValidationErrorKind::RepositoryError,
            ),
        };

        let body = Json(json!({
            "error": self.to_string(),
            "kind": kind,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
