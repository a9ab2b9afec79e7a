//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, field_issue::FieldIssue, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more request fields failed validation.
    #[error("Validation error")]
    Validation(Vec<FieldIssue>),

    /// Body is not JSON, or not JSON of the expected shape.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("An account with this email already exists")]
    EmailTaken,

    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No session cookie, or a cookie that no longer maps to a live session.
    #[error("Unauthorized")]
    Unauthenticated,

    #[error("User not found")]
    UserNotFound,

    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] PasswordHashError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn validation(issue: impl Into<FieldIssue>) -> Self {
        AuthError::Validation(vec![issue.into()])
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::UnprocessableEntity,
            AuthError::MalformedRequest(_) => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Database(
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_),
            ) => ErrorKind::ServiceUnavailable,
            AuthError::PasswordHash(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::MalformedRequest(_) => "MALFORMED_REQUEST",
            AuthError::EmailTaken => "EMAIL_TAKEN",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::Unauthenticated => "UNAUTHORIZED",
            AuthError::UserNotFound => "NOT_FOUND",
            AuthError::Database(_) => "PERSISTENCE_ERROR",
            AuthError::PasswordHash(_) | AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Auth password hashing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let kind = err.kind();
        let code = err.code();
        let app_err = match err {
            AuthError::Validation(issues) => AppError::new(kind, "Validation error")
                .with_details(serde_json::to_value(issues).unwrap_or_default()),
            AuthError::InvalidCredentials => AppError::new(kind, "Invalid email or password")
                .with_action("Check your email and password and try again"),
            AuthError::Unauthenticated => {
                AppError::new(kind, "Unauthorized").with_action("Please sign in")
            }
            AuthError::Database(e) => AppError::new(kind, "Failed to access account storage")
                .with_action("Please try again later")
                .with_source(e),
            AuthError::PasswordHash(e) => {
                AppError::new(kind, "Failed to process credentials").with_source(e)
            }
            other => AppError::new(kind, other.to_string()),
        };
        app_err.with_code(code)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
