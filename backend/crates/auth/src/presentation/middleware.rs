//! Auth Middleware
//!
//! Guards routes that need a signed-in user.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::{AuthSessionId, UserId};

use crate::application::CheckSessionUseCase;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Inserted into request extensions once the session checks out.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub session_id: AuthSessionId,
}

/// Rejects the request with 401 unless the session cookie maps to a live
/// session of an existing user.
pub async fn require_auth_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let token = state
        .config
        .cookie()
        .extract(req.headers())
        .ok_or(AuthError::Unauthenticated)?;

    let use_case = CheckSessionUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );
    let (session, user) = use_case.execute(&token).await?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: user.user_id,
        session_id: session.session_id,
    });

    Ok(next.run(req).await)
}
