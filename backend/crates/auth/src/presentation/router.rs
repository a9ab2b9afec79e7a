//! Auth Router
//!
//! Both routers are meant to be nested under `/api`.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth_session;

/// `/auth/*` backed by PostgreSQL
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// `/profile` backed by PostgreSQL
pub fn profile_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    profile_router_generic(repo, config)
}

pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/auth/signup", post(handlers::sign_up::<R>))
        .route("/auth/signin", post(handlers::sign_in::<R>))
        .route("/auth/signout", post(handlers::sign_out::<R>))
        .route("/auth/status", get(handlers::session_status::<R>))
        .with_state(state)
}

pub fn profile_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    let profile = get(handlers::get_profile::<R>)
        .put(handlers::update_profile::<R>)
        .route_layer(from_fn_with_state(
            state.clone(),
            require_auth_session::<R>,
        ));

    Router::new().route("/profile", profile).with_state(state)
}
