//! Avatar image URL.

use std::fmt;

use kernel::error::field_issue::FieldIssue;
use thiserror::Error;

pub const AVATAR_URL_MAX_LENGTH: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvatarUrlError {
    #[error("Image URL must be at most {max} characters")]
    TooLong { max: usize },

    #[error("Image must be an http or https URL")]
    InvalidScheme,

    #[error("Image URL is not valid")]
    Invalid,
}

impl From<AvatarUrlError> for FieldIssue {
    fn from(err: AvatarUrlError) -> Self {
        FieldIssue::new("image", err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvatarUrl(String);

impl AvatarUrl {
    /// Parses user input. Blank input means "no avatar" and yields `None`.
    pub fn parse(raw: &str) -> Result<Option<Self>, AvatarUrlError> {
        let url = raw.trim();
        if url.is_empty() {
            return Ok(None);
        }

        if url.len() > AVATAR_URL_MAX_LENGTH {
            return Err(AvatarUrlError::TooLong {
                max: AVATAR_URL_MAX_LENGTH,
            });
        }

        let lower = url.to_ascii_lowercase();
        let rest = lower
            .strip_prefix("https://")
            .or_else(|| lower.strip_prefix("http://"))
            .ok_or(AvatarUrlError::InvalidScheme)?;

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() || url.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(AvatarUrlError::Invalid);
        }

        Ok(Some(Self(url.to_string())))
    }

    /// Rebuilds a value read back from the database.
    pub fn from_db(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AvatarUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
