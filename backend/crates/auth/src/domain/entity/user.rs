//! User Entity
//!
//! An account: credentials plus the profile fields shown on `/profile`.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    avatar_url::AvatarUrl, display_name::DisplayName, email::Email, user_password::UserPassword,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub name: DisplayName,
    /// Unique, lower-cased. Fixed at sign up.
    pub email: Email,
    pub password_hash: UserPassword,
    pub image: Option<AvatarUrl>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: DisplayName, email: Email, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            password_hash,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, name: DisplayName) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// `None` removes the avatar.
    pub fn set_image(&mut self, image: Option<AvatarUrl>) {
        self.image = image;
        self.updated_at = Utc::now();
    }
}
