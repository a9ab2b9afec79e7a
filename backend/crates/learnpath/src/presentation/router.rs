//! Learning path router
//!
//! Meant to be nested under `/api`.

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use platform::rate_limit::FixedWindowRateLimiter;

use crate::application::config::LearnPathConfig;
use crate::domain::repository::{CurriculumGenerator, LearningPathRepository};
use crate::infra::content_source::ContentSource;
use crate::infra::postgres::PgLearningPathRepository;
use crate::presentation::handlers::{self, LearnPathAppState};
use crate::presentation::middleware::{RateLimitState, enforce_rate_limit};

/// Router backed by PostgreSQL and the content source selected at startup.
pub fn learnpath_router(
    repo: PgLearningPathRepository,
    generator: ContentSource,
    limiter: Arc<FixedWindowRateLimiter>,
    config: LearnPathConfig,
) -> Router {
    learnpath_router_generic(repo, generator, limiter, config)
}

pub fn learnpath_router_generic<R, G>(
    repo: R,
    generator: G,
    limiter: Arc<FixedWindowRateLimiter>,
    config: LearnPathConfig,
) -> Router
where
    R: LearningPathRepository + Send + Sync + 'static,
    G: CurriculumGenerator + Send + Sync + 'static,
{
    let generate_limit =
        RateLimitState::new("generate", limiter.clone(), config.generate_rate_limit);
    let refine_limit = RateLimitState::new("refine", limiter, config.refine_rate_limit);

    let state = LearnPathAppState {
        repo: Arc::new(repo),
        generator: Arc::new(generator),
        config: Arc::new(config),
    };

    let generate = post(handlers::generate_path::<R, G>)
        .route_layer(from_fn_with_state(generate_limit, enforce_rate_limit));
    let refine = post(handlers::refine_path::<R, G>)
        .route_layer(from_fn_with_state(refine_limit, enforce_rate_limit));
    let record = get(handlers::get_path::<R, G>).delete(handlers::delete_path::<R, G>);

    Router::new()
        .route("/learnpath", generate.clone())
        .route("/learnpath/refine", refine)
        .route("/learnpath/history", get(handlers::list_history::<R, G>))
        .route("/learnpath/{id}", record.clone())
        // legacy paths kept for older clients
        .route("/generate-path", generate)
        .route("/paths", get(handlers::list_history::<R, G>))
        .route("/paths/{id}", record)
        .with_state(state)
}
