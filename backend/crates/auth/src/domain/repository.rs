//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{AuthSessionId, UserId};

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Fails with `AuthError::EmailTaken` if the email is already registered.
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Writes the profile fields (name, image, updated_at).
    async fn update(&self, user: &User) -> AuthResult<()>;
}

#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Sessions past their expiry are not returned.
    async fn find_by_id(&self, session_id: AuthSessionId) -> AuthResult<Option<AuthSession>>;

    /// Writes expiry and last activity.
    async fn update(&self, session: &AuthSession) -> AuthResult<()>;

    async fn delete(&self, session_id: AuthSessionId) -> AuthResult<()>;

    /// Removes every expired session, returning how many were removed.
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
