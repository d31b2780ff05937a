//! Scoreboard Error Types
//!
//! This module provides scoreboard-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordPolicyError;
use thiserror::Error;

use crate::domain::value_object::progress_delta::DeltaError;
use crate::domain::value_object::user_name::UserNameError;

/// Scoreboard-specific result type alias
pub type ScoreboardResult<T> = Result<T, ScoreboardError>;

/// Scoreboard-specific error variants
///
/// The `Display` text of client errors is the `message` sent to clients.
#[derive(Debug, Error)]
pub enum ScoreboardError {
    /// Registration without user name or password
    #[error("Username and password are required.")]
    MissingCredentials,

    /// Update without user name
    #[error("Username is required.")]
    MissingUserName,

    /// User name failed validation
    #[error("Invalid username: {0}")]
    InvalidUserName(#[from] UserNameError),

    /// Password failed the policy
    #[error("{0}")]
    PasswordPolicy(#[from] PasswordPolicyError),

    /// newScore / newEmission could not be read as numbers
    #[error("newScore and newEmission must be valid numbers.")]
    InvalidDelta(#[from] DeltaError),

    /// Request body is not valid JSON for the endpoint
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// User name already exists
    #[error("Username is already taken.")]
    UserNameTaken,

    /// Unknown user or wrong password (indistinguishable on purpose)
    #[error("Invalid username or password.")]
    InvalidCredentials,

    /// User not found
    #[error("User not found.")]
    UserNotFound,

    /// Stored document cannot be mapped back to a user
    #[error("Corrupt user record: {0}")]
    CorruptRecord(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ScoreboardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoreboardError::MissingCredentials
            | ScoreboardError::MissingUserName
            | ScoreboardError::InvalidUserName(_)
            | ScoreboardError::PasswordPolicy(_)
            | ScoreboardError::InvalidDelta(_)
            | ScoreboardError::MalformedBody(_) => ErrorKind::BadRequest,
            ScoreboardError::UserNameTaken => ErrorKind::Conflict,
            ScoreboardError::InvalidCredentials => ErrorKind::Unauthorized,
            ScoreboardError::UserNotFound => ErrorKind::NotFound,
            ScoreboardError::CorruptRecord(_)
            | ScoreboardError::Database(_)
            | ScoreboardError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server errors keep a generic message and carry the cause as detail.
    pub fn into_app_error(self) -> AppError {
        match self {
            ScoreboardError::Database(e) => AppError::from(e),
            ScoreboardError::CorruptRecord(msg) | ScoreboardError::Internal(msg) => {
                AppError::internal("Server error").with_detail(msg)
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ScoreboardError::Database(e) => {
                tracing::error!(error = %e, "Scoreboard database error");
            }
            ScoreboardError::CorruptRecord(msg) => {
                tracing::error!(message = %msg, "Corrupt user record");
            }
            ScoreboardError::Internal(msg) => {
                tracing::error!(message = %msg, "Scoreboard internal error");
            }
            ScoreboardError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Scoreboard error");
            }
        }
    }
}

impl IntoResponse for ScoreboardError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<JsonRejection> for ScoreboardError {
    fn from(rejection: JsonRejection) -> Self {
        ScoreboardError::MalformedBody(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for ScoreboardError {
    fn from(err: tokio::task::JoinError) -> Self {
        ScoreboardError::Internal(format!("password task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ScoreboardError::MissingCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ScoreboardError::UserNameTaken.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ScoreboardError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ScoreboardError::UserNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ScoreboardError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_error_message_is_display_text() {
        let app = ScoreboardError::InvalidDelta(DeltaError {
            fields: vec!["newScore"],
        })
        .into_app_error();
        assert_eq!(app.message(), "newScore and newEmission must be valid numbers.");
        assert!(app.detail().is_none());
    }

    #[test]
    fn test_internal_error_carries_detail() {
        let app = ScoreboardError::Internal("store offline".into()).into_app_error();
        assert_eq!(app.message(), "Server error");
        assert_eq!(app.detail(), Some("store offline"));
    }
}
