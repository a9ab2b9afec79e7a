//! Rate-limit middleware
//!
//! Runs before the handler so rejected clients never reach validation,
//! the content source or the store.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::client::client_identifier;
use platform::rate_limit::{FixedWindowRateLimiter, RateLimitConfig};

use crate::error::{LearnPathError, append_rate_limit_headers};

/// One quota applied to one group of routes. Routes sharing a `scope` share
/// a counter per client.
#[derive(Clone)]
pub struct RateLimitState {
    pub scope: &'static str,
    pub limiter: Arc<FixedWindowRateLimiter>,
    pub config: RateLimitConfig,
}

impl RateLimitState {
    pub fn new(
        scope: &'static str,
        limiter: Arc<FixedWindowRateLimiter>,
        config: RateLimitConfig,
    ) -> Self {
        Self {
            scope,
            limiter,
            config,
        }
    }
}

pub async fn enforce_rate_limit(
    State(state): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let client = client_identifier(req.headers());
    let key = format!("{}:{}", state.scope, client);
    let result = state.limiter.check(&key, &state.config);

    if !result.allowed {
        tracing::info!(client = %client, scope = state.scope, "Rejecting rate-limited request");
        return LearnPathError::RateLimited(result).into_response();
    }

    let mut response = next.run(req).await;
    append_rate_limit_headers(response.headers_mut(), &result);
    response
}
