//! Sign Up Use Case
//!
//! Creates a new account. Does not sign the user in.

use std::sync::Arc;

use kernel::error::field_issue::FieldIssue;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_password::{RawPassword, UserPassword, password_issue},
};
use crate::error::{AuthError, AuthResult};

pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        let mut issues: Vec<FieldIssue> = Vec::new();

        let name = DisplayName::new(&input.name)
            .map_err(|e| issues.push(e.into()))
            .ok();
        let email = Email::new(&input.email)
            .map_err(|e| issues.push(e.into()))
            .ok();
        let password = RawPassword::new(input.password)
            .map_err(|e| issues.push(password_issue(e)))
            .ok();

        let (Some(name), Some(email), Some(password)) = (name, email, password) else {
            return Err(AuthError::Validation(issues));
        };

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = UserPassword::from_raw(&password, self.config.pepper())?;
        let user = User::new(name, email, password_hash);

        // a concurrent sign up with the same email still fails here
        self.user_repo.create(&user).await?;

        tracing::info!(user_id = %user.user_id, "User signed up");

        Ok(user)
    }
}
