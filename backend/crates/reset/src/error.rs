//! Reset Error Types
//!
//! This module provides workflow-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Reset-specific result type alias
pub type ResetResult<T> = Result<T, ResetError>;

/// Reset-specific error variants
#[derive(Debug, Error)]
pub enum ResetError {
    /// Reset request not found
    #[error("Reset request not found")]
    RequestNotFound,

    /// Request is no longer pending (processing is not idempotent)
    #[error("Reset request has already been processed")]
    AlreadyProcessed,

    /// Email failed validation
    #[error("Invalid email address")]
    InvalidEmail,

    /// Malformed request or administrator identifier
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Rate profile exhausted for the caller's window
    #[error("Rate limit exceeded")]
    RateLimited { limit: u32, reset_at_ms: i64 },

    /// Identity provider call failed; the request stays pending
    #[error("Identity provider error: {0}")]
    IdentityProvider(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResetError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ResetError::RequestNotFound => StatusCode::NOT_FOUND,
            ResetError::AlreadyProcessed => StatusCode::CONFLICT,
            ResetError::InvalidEmail | ResetError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            ResetError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ResetError::IdentityProvider(_) => StatusCode::BAD_GATEWAY,
            ResetError::Database(_) | ResetError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResetError::RequestNotFound => ErrorKind::NotFound,
            ResetError::AlreadyProcessed => ErrorKind::Conflict,
            ResetError::InvalidEmail | ResetError::InvalidIdentifier(_) => ErrorKind::BadRequest,
            ResetError::RateLimited { .. } => ErrorKind::TooManyRequests,
            ResetError::IdentityProvider(_) => ErrorKind::BadGateway,
            ResetError::Database(_) | ResetError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError for the response envelope.
    ///
    /// Upstream and internal detail is logged where the error is raised and
    /// never put in the envelope.
    pub fn into_app_error(self) -> AppError {
        match self {
            // Kernel's sqlx mapping keeps the distinct, actionable cases
            // (e.g. missing relation -> schema not initialized).
            ResetError::Database(e) => AppError::from(e),
            ResetError::IdentityProvider(_) => {
                AppError::bad_gateway("Identity provider request failed")
            }
            ResetError::Internal(_) => AppError::internal("Internal error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ResetError::Database(e) => {
                tracing::error!(error = %e, "Reset database error");
            }
            ResetError::IdentityProvider(msg) => {
                tracing::error!(message = %msg, "Identity provider failure");
            }
            ResetError::Internal(msg) => {
                tracing::error!(message = %msg, "Reset internal error");
            }
            ResetError::RateLimited { limit, .. } => {
                tracing::warn!(limit, "Reset rate limit exceeded");
            }
            ResetError::AlreadyProcessed => {
                tracing::warn!("Attempt to re-process a completed reset request");
            }
            _ => {
                tracing::debug!(error = %self, "Reset error");
            }
        }
    }
}

impl IntoResponse for ResetError {
    fn into_response(self) -> Response {
        self.log();
        match self {
            // Same fixed 429 shape as the middleware, headers included.
            ResetError::RateLimited { limit, reset_at_ms } => {
                platform::rate_limit::rate_limit_response(limit, reset_at_ms)
            }
            other => other.into_app_error().into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ResetError::RequestNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ResetError::AlreadyProcessed.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ResetError::InvalidEmail.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ResetError::InvalidIdentifier("abc".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ResetError::RateLimited {
                limit: 5,
                reset_at_ms: 0
            }
            .status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ResetError::IdentityProvider("boom".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ResetError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_detail_is_not_leaked() {
        let err = ResetError::IdentityProvider("token abc123 rejected by vault".into());
        let app_err = err.into_app_error();

        assert_eq!(app_err.kind(), ErrorKind::BadGateway);
        assert!(!app_err.message().contains("abc123"));

        let err = ResetError::Internal("connection string leaked".into());
        let app_err = err.into_app_error();
        assert!(!app_err.message().contains("connection string"));
    }

    #[test]
    fn test_rate_limited_response_carries_headers() {
        let err = ResetError::RateLimited {
            limit: 5,
            reset_at_ms: i64::MAX / 2,
        };
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key("retry-after"));
        assert_eq!(response.headers().get("x-ratelimit-remaining").unwrap(), "0");
    }
}
