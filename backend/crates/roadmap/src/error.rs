//! Roadmap errors

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type RoadmapResult<T> = Result<T, RoadmapError>;

#[derive(Debug, Error)]
pub enum RoadmapError {
    #[error("Roadmap not found")]
    NotFound(String),

    #[error("Roadmap catalog is not valid JSON: {0}")]
    InvalidCatalog(#[from] serde_json::Error),

    #[error("Roadmap slug appears twice: {0}")]
    DuplicateSlug(String),
}

impl RoadmapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RoadmapError::NotFound(_) => ErrorKind::NotFound,
            RoadmapError::InvalidCatalog(_) | RoadmapError::DuplicateSlug(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RoadmapError::NotFound(_) => "NOT_FOUND",
            RoadmapError::InvalidCatalog(_) | RoadmapError::DuplicateSlug(_) => "INTERNAL_ERROR",
        }
    }

    fn log(&self) {
        match self {
            RoadmapError::NotFound(slug) => tracing::debug!(slug = %slug, "Roadmap not found"),
            other => tracing::error!(error = %other, "Roadmap catalog error"),
        }
    }
}

impl From<RoadmapError> for AppError {
    fn from(err: RoadmapError) -> Self {
        let code = err.code();
        AppError::new(err.kind(), err.to_string()).with_code(code)
    }
}

impl IntoResponse for RoadmapError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
