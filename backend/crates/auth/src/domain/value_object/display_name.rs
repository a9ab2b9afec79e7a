//! Display Name Value Object
//!
//! The name shown on the profile page. Free text, not an identifier, so any
//! script is allowed; only length and control characters are checked.
//!
//! Processing order: NFKC normalization → trim → validation.

use std::fmt;

use kernel::error::field_issue::FieldIssue;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const DISPLAY_NAME_MIN_LENGTH: usize = 2;
pub const DISPLAY_NAME_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayNameError {
    #[error("Name is required")]
    Empty,

    #[error("Name must be at least {min} characters")]
    TooShort { min: usize },

    #[error("Name must be at most {max} characters")]
    TooLong { max: usize },

    #[error("Name cannot contain control characters")]
    InvalidCharacter,
}

impl From<DisplayNameError> for FieldIssue {
    fn from(err: DisplayNameError) -> Self {
        FieldIssue::new("name", err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, DisplayNameError> {
        let normalized: String = input.as_ref().nfkc().collect();
        let name = normalized.trim();

        if name.is_empty() {
            return Err(DisplayNameError::Empty);
        }

        // length in code points
        let length = name.chars().count();
        if length < DISPLAY_NAME_MIN_LENGTH {
            return Err(DisplayNameError::TooShort {
                min: DISPLAY_NAME_MIN_LENGTH,
            });
        }
        if length > DISPLAY_NAME_MAX_LENGTH {
            return Err(DisplayNameError::TooLong {
                max: DISPLAY_NAME_MAX_LENGTH,
            });
        }

        if name.chars().any(char::is_control) {
            return Err(DisplayNameError::InvalidCharacter);
        }

        Ok(Self(name.to_string()))
    }

    /// Rebuilds a value read back from the database.
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
