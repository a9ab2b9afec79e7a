//! Profile Use Cases
//!
//! Read and update the signed-in user's name and avatar. The email is shown
//! but never changed here.

use std::sync::Arc;

use kernel::error::field_issue::FieldIssue;
use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{avatar_url::AvatarUrl, display_name::DisplayName, email::Email};
use crate::error::{AuthError, AuthResult};

pub struct GetProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: UserId) -> AuthResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Absent fields are left unchanged.
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    /// `Some(None)` or a blank string removes the avatar.
    pub image: Option<Option<String>>,
    /// Accepted only when equal to the stored email.
    pub email: Option<String>,
}

pub struct UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: UserId, input: UpdateProfileInput) -> AuthResult<User> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let mut issues: Vec<FieldIssue> = Vec::new();

        let name = match input.name.as_deref().map(DisplayName::new) {
            Some(Ok(name)) => Some(name),
            Some(Err(e)) => {
                issues.push(e.into());
                None
            }
            None => None,
        };

        let image = match input.image {
            Some(raw) => match AvatarUrl::parse(raw.as_deref().unwrap_or_default()) {
                Ok(image) => Some(image),
                Err(e) => {
                    issues.push(e.into());
                    None
                }
            },
            None => None,
        };

        if let Some(raw) = input.email.as_deref() {
            let unchanged = Email::new(raw).is_ok_and(|email| email == user.email);
            if !unchanged {
                issues.push(FieldIssue::new("email", "Email cannot be changed"));
            }
        }

        if !issues.is_empty() {
            return Err(AuthError::Validation(issues));
        }

        if let Some(name) = name {
            user.rename(name);
        }
        if let Some(image) = image {
            user.set_image(image);
        }

        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Profile updated");

        Ok(user)
    }
}
