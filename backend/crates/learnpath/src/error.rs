//! Learning path errors
//!
//! Every failure of the generation pipeline maps to one variant here, and
//! each variant to one HTTP status and one machine-readable code.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::rate_limit::{RateLimitResult, now_ms};
use thiserror::Error;

use crate::domain::services::CurriculumViolation;
use crate::domain::value_objects::FieldIssue;

pub type LearnPathResult<T> = Result<T, LearnPathError>;

pub const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Why a content source failed to produce a usable curriculum.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Completion service request failed: {0}")]
    Transport(String),

    #[error("Completion service returned status {status}")]
    Upstream { status: u16, body: String },

    #[error("Empty response from completion service")]
    EmptyResponse,

    #[error("AI returned invalid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("AI response validation failed: {0}")]
    UnexpectedShape(String),

    #[error("AI response validation failed: {}", join_violations(.0))]
    InvalidStructure(Vec<CurriculumViolation>),
}

fn join_violations(violations: &[CurriculumViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum LearnPathError {
    /// One or more request fields failed validation.
    #[error("Validation error")]
    Validation(Vec<FieldIssue>),

    /// Body is not JSON, or not JSON of the expected shape.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Failed to generate learning path: {0}")]
    Generation(#[from] GenerationError),

    #[error("Learning path generation timed out after {}s", .0.as_secs())]
    GenerationTimeout(Duration),

    #[error("Learning path storage error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Learning path storage did not respond within {}s", .0.as_secs())]
    PersistenceTimeout(Duration),

    #[error("Rate limit exceeded")]
    RateLimited(RateLimitResult),

    #[error("Learning path not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LearnPathError {
    pub fn validation(issue: FieldIssue) -> Self {
        LearnPathError::Validation(vec![issue])
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LearnPathError::Validation(_) => ErrorKind::UnprocessableEntity,
            LearnPathError::MalformedRequest(_) => ErrorKind::BadRequest,
            LearnPathError::Generation(_) | LearnPathError::Internal(_) => {
                ErrorKind::InternalServerError
            }
            LearnPathError::GenerationTimeout(_) | LearnPathError::PersistenceTimeout(_) => {
                ErrorKind::GatewayTimeout
            }
            LearnPathError::Database(e) => match e {
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                    ErrorKind::ServiceUnavailable
                }
                _ => ErrorKind::InternalServerError,
            },
            LearnPathError::RateLimited(_) => ErrorKind::TooManyRequests,
            LearnPathError::NotFound => ErrorKind::NotFound,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn code(&self) -> &'static str {
        match self {
            LearnPathError::Validation(_) => "VALIDATION_ERROR",
            LearnPathError::MalformedRequest(_) => "MALFORMED_REQUEST",
            LearnPathError::Generation(_) => "GENERATION_ERROR",
            LearnPathError::GenerationTimeout(_) => "GENERATION_TIMEOUT",
            LearnPathError::Database(_) => "PERSISTENCE_ERROR",
            LearnPathError::PersistenceTimeout(_) => "PERSISTENCE_TIMEOUT",
            LearnPathError::RateLimited(_) => "RATE_LIMITED",
            LearnPathError::NotFound => "NOT_FOUND",
            LearnPathError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn log(&self) {
        match self {
            LearnPathError::Generation(GenerationError::Upstream { status, body }) => {
                tracing::error!(status, body = %body, "Completion service rejected request");
            }
            LearnPathError::Generation(e) => {
                tracing::error!(error = %e, "Learning path generation failed");
            }
            LearnPathError::Database(e) => {
                tracing::error!(error = %e, "Learning path database error");
            }
            LearnPathError::Internal(msg) => {
                tracing::error!(message = %msg, "Learning path internal error");
            }
            LearnPathError::GenerationTimeout(_) | LearnPathError::PersistenceTimeout(_) => {
                tracing::warn!(error = %self, "Learning path upstream timeout");
            }
            LearnPathError::RateLimited(result) => {
                tracing::warn!(
                    limit = result.limit,
                    reset_at_ms = result.reset_at_ms,
                    "Learning path rate limit exceeded"
                );
            }
            _ => {
                tracing::debug!(error = %self, "Learning path request rejected");
            }
        }
    }
}

impl From<LearnPathError> for AppError {
    fn from(err: LearnPathError) -> Self {
        let kind = err.kind();
        let code = err.code();
        let app_err = match err {
            LearnPathError::Validation(issues) => AppError::new(kind, "Validation error")
                .with_details(serde_json::to_value(issues).unwrap_or_default()),
            LearnPathError::Generation(e) => {
                AppError::new(kind, format!("Failed to generate learning path: {e}"))
                    .with_action("Please try again in a moment")
                    .with_source(e)
            }
            LearnPathError::Database(e) => AppError::new(kind, "Failed to access learning path storage")
                .with_action("Please try again later")
                .with_source(e),
            LearnPathError::RateLimited(result) => AppError::new(
                kind,
                "Too many requests. Please slow down and try again later.",
            )
            .with_details(serde_json::json!({
                "limit": result.limit,
                "retryAfter": result.retry_after_secs(now_ms()),
                "resetTime": result.reset_at_ms,
            })),
            other => AppError::new(kind, other.to_string()),
        };
        app_err.with_code(code)
    }
}

impl IntoResponse for LearnPathError {
    fn into_response(self) -> Response {
        self.log();

        let rate_limit = match &self {
            LearnPathError::RateLimited(result) => Some(*result),
            _ => None,
        };

        let mut response = AppError::from(self).into_response();
        if let Some(result) = rate_limit {
            let headers = response.headers_mut();
            append_rate_limit_headers(headers, &result);
            headers.insert(
                header::RETRY_AFTER,
                HeaderValue::from(result.retry_after_secs(now_ms())),
            );
        }
        response
    }
}

/// `X-RateLimit-*` headers describing the caller's current window.
pub fn append_rate_limit_headers(headers: &mut axum::http::HeaderMap, result: &RateLimitResult) {
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(result.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(result.remaining));
    headers.insert(X_RATELIMIT_RESET, HeaderValue::from(result.reset_at_ms));
}
