//! Gift Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Gift-specific result type alias
pub type GiftResult<T> = Result<T, GiftError>;

/// Gift-specific error variants
#[derive(Debug, Error)]
pub enum GiftError {
    /// Gift not found
    #[error("Gift not found")]
    GiftNotFound,

    /// Gift id already exists
    #[error("Gift id already exists")]
    DuplicateId,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GiftError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GiftError::GiftNotFound => StatusCode::NOT_FOUND,
            GiftError::DuplicateId => StatusCode::CONFLICT,
            GiftError::Database(_) | GiftError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GiftError::GiftNotFound => ErrorKind::NotFound,
            GiftError::DuplicateId => ErrorKind::Conflict,
            GiftError::Database(_) | GiftError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            GiftError::Database(_) | GiftError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            GiftError::Database(e) => {
                tracing::error!(error = %e, "Gift database error");
            }
            GiftError::Internal(msg) => {
                tracing::error!(message = %msg, "Gift internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Gift error");
            }
        }
    }
}

impl IntoResponse for GiftError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GiftError::GiftNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(GiftError::DuplicateId.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            GiftError::Internal("x".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_never_leaks() {
        let err = GiftError::Internal("postgres://secret".to_string());
        assert_eq!(err.to_app_error().message(), "Internal server error");
    }
}
