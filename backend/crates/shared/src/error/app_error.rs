//! [`AppError`]: the error every crate hands to the HTTP boundary.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// Application-wide error.
///
/// Built with a small builder API:
///
/// ```rust
/// use kernel::error::app_error::AppError;
///
/// let err = AppError::unprocessable("Validation error")
///     .with_code("VALIDATION_ERROR")
///     .with_details(serde_json::json!([{ "field": "topic", "message": "Topic is required" }]));
/// assert_eq!(err.status_code(), 422);
/// assert_eq!(err.code(), "VALIDATION_ERROR");
/// ```
pub struct AppError {
    kind: ErrorKind,
    /// Human readable, safe to show to the caller.
    message: Cow<'static, str>,
    /// Stable machine-readable code; falls back to [`ErrorKind::default_code`].
    code: Option<Cow<'static, str>>,
    /// Structured extra payload (per-field validation issues, retry hints).
    details: Option<serde_json::Value>,
    action: Option<Cow<'static, str>>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl AppError {
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            details: None,
            action: None,
            source: None,
        }
    }

    #[inline]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    #[inline]
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    #[inline]
    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    #[inline]
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    #[inline]
    pub fn unprocessable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::UnprocessableEntity, message)
    }

    #[inline]
    pub fn too_many_requests(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::TooManyRequests, message)
    }

    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    #[inline]
    pub fn service_unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    #[inline]
    pub fn gateway_timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::GatewayTimeout, message)
    }

    #[inline]
    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[inline]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Hint telling the caller what to do next ("Try again in a minute").
    #[inline]
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Attach the underlying cause. Never serialized, only logged.
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or(self.kind.default_code())
    }

    #[inline]
    pub fn details(&self) -> Option<&serde_json::Value> {
        self.details.as_ref()
    }

    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    #[inline]
    pub fn is_client_error(&self) -> bool {
        self.kind.is_client_error()
    }

    /// JSON body sent to clients:
    /// `{success: false, error, code, message, details?, action?}`.
    pub fn to_body(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "success": false,
            "error": self.kind.as_str(),
            "code": self.code(),
            "message": self.message(),
        });
        if let Some(map) = body.as_object_mut() {
            if let Some(details) = &self.details {
                map.insert("details".to_owned(), details.clone());
            }
            if let Some(action) = &self.action {
                map.insert("action".to_owned(), serde_json::Value::from(action.as_ref()));
            }
        }
        body
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("code", &self.code());
        builder.field("message", &self.message);
        if let Some(details) = &self.details {
            builder.field("details", details);
        }
        if let Some(action) = &self.action {
            builder.field("action", action);
        }
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)?;
        if let Some(action) = &self.action {
            write!(f, " (Action: {})", action)?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_defaults_to_kind() {
        let err = AppError::not_found("Learning path not found");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.code(), "NOT_FOUND");

        let err = AppError::internal("boom").with_code("GENERATION_ERROR");
        assert_eq!(err.code(), "GENERATION_ERROR");
    }

    #[test]
    fn test_body_shape() {
        let err = AppError::unprocessable("Validation error")
            .with_details(serde_json::json!([{"field": "topic", "message": "Topic is required"}]));
        let body = err.to_body();

        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Unprocessable Entity");
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Validation error");
        assert_eq!(body["details"][0]["field"], "topic");
        assert!(body.get("action").is_none());
    }

    #[test]
    fn test_display_and_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let err = AppError::internal("Failed to read file")
            .with_action("Retry later")
            .with_source(io_err);
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "[INTERNAL_ERROR] Failed to read file (Action: Retry later)"
        );
    }
}
