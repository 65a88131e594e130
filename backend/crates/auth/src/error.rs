//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use serde::Serialize;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// A single field-level validation failure
///
/// Registration and profile updates validate every field and report
/// all violations together, not just the first one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more request fields failed validation
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Email is already registered
    #[error("Email is already registered")]
    DuplicateEmail,

    /// Invalid credentials (unknown email or wrong password - never
    /// distinguished)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No session cookie on a protected route
    #[error("Authentication required")]
    TokenMissing,

    /// Token is malformed or its signature does not verify
    #[error("Invalid session token")]
    TokenInvalid,

    /// Token signature is valid but the token has expired
    #[error("Session token expired")]
    TokenExpired,

    /// Token version no longer matches the stored version
    #[error("Session token has been revoked")]
    StaleVersion,

    /// Token subject no longer exists in the store
    #[error("User not found")]
    UserNotFound,

    /// Too many login attempts from this caller
    #[error("Too many login attempts, try again later")]
    RateLimited,

    /// An authenticated user's record vanished mid-request
    #[error("Internal inconsistency")]
    InternalInconsistency,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) | AuthError::DuplicateEmail => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::TokenMissing => StatusCode::FORBIDDEN,
            AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::StaleVersion
            | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
            AuthError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AuthError::InternalInconsistency
            | AuthError::Database(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::DuplicateEmail => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::TokenMissing => ErrorKind::Forbidden,
            AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::StaleVersion
            | AuthError::UserNotFound => ErrorKind::Unauthorized,
            AuthError::RateLimited => ErrorKind::TooManyRequests,
            AuthError::InternalInconsistency
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side detail stays in the logs; the response body only
    /// ever carries a generic message for 500-class errors.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) | AuthError::InternalInconsistency => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InternalInconsistency => {
                tracing::error!("Authenticated user missing from store");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::RateLimited => {
                tracing::warn!("Login rate limit exceeded");
            }
            AuthError::StaleVersion => {
                tracing::warn!("Rejected token with stale version");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();

        // Validation keeps its field list in the response body;
        // everything else goes through the unified problem response.
        if let AuthError::Validation(fields) = &self {
            let body = serde_json::json!({
                "type": "https://httpstatuses.io/400",
                "title": ErrorKind::BadRequest.as_str(),
                "status": 400,
                "detail": "Validation failed",
                "errors": fields,
            });
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }

        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
