//! Check Session Use Case
//!
//! Resolves a session token to a live session and its user.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

pub struct CheckSessionUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> CheckSessionUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// Returns the session (activity touched, remember-me expiry slid
    /// forward) and the account it belongs to.
    pub async fn execute(&self, session_token: &str) -> AuthResult<(AuthSession, User)> {
        let session_id = session_token::verify(&self.config.session_secret, session_token)?;

        let mut session = self
            .session_repo
            .find_by_id(session_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            return Err(AuthError::Unauthenticated);
        }

        let Some(user) = self.user_repo.find_by_id(session.user_id).await? else {
            tracing::warn!(session_id = %session_id, "Session refers to a missing user");
            self.session_repo.delete(session_id).await?;
            return Err(AuthError::Unauthenticated);
        };

        session.touch();
        let ttl_long = chrono::Duration::from_std(self.config.session_ttl_long)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;
        session.extend_if_needed(ttl_long);

        // activity bookkeeping must not fail the request
        if let Err(e) = self.session_repo.update(&session).await {
            tracing::warn!(error = %e, "Failed to update session activity");
        }

        Ok((session, user))
    }
}
