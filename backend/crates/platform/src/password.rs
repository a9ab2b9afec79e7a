//! Account password handling.
//!
//! Passwords are NFKC-normalized, length checked, and hashed with Argon2id
//! into a PHC string. The clear text is zeroized on drop.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },

    #[error("Password must be at most {max} characters")]
    TooLong { max: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

/// Clear text password. Not `Clone`, redacted in `Debug`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw);
        let normalized: String = raw.nfkc().collect();
        let password = Self(normalized);

        if password.0.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // code points, not bytes
        let length = password.0.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
            });
        }
        if password
            .0
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(password)
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = self.0.as_bytes().to_vec();
        if let Some(pepper) = pepper {
            bytes.extend_from_slice(pepper);
        }
        Zeroizing::new(bytes)
    }

    /// Argon2id with the crate's default parameters and a fresh 16-byte salt.
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword([REDACTED])")
    }
}

/// Argon2id hash in PHC string format, as stored in the database.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Constant-time check of `password` against this hash.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(&password.peppered(pepper), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([HASH])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        assert_eq!(
            ClearTextPassword::new("abc12".into()).unwrap_err(),
            PasswordPolicyError::TooShort { min: 6 }
        );
        assert!(ClearTextPassword::new("abc123".into()).is_ok());
        assert_eq!(
            ClearTextPassword::new("x".repeat(129)).unwrap_err(),
            PasswordPolicyError::TooLong { max: 128 }
        );
    }

    #[test]
    fn test_rejects_blank_and_control_characters() {
        assert_eq!(
            ClearTextPassword::new("        ".into()).unwrap_err(),
            PasswordPolicyError::EmptyOrWhitespace
        );
        assert_eq!(
            ClearTextPassword::new("abc\u{0007}defg".into()).unwrap_err(),
            PasswordPolicyError::InvalidCharacter
        );
    }

    #[test]
    fn test_hash_and_verify_with_pepper() {
        let password = ClearTextPassword::new("correct horse".into()).unwrap();
        let pepper = b"pepper";
        let hashed = password.hash(Some(pepper)).unwrap();

        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hashed.verify(&password, Some(pepper)));
        assert!(!hashed.verify(&password, None));

        let wrong = ClearTextPassword::new("wrong horse".into()).unwrap();
        assert!(!hashed.verify(&wrong, Some(pepper)));
    }

    #[test]
    fn test_nfkc_normalization_matches_equivalent_forms() {
        // full-width digits normalize to ASCII
        let full_width = ClearTextPassword::new("ｐａｓｓ１２３".into()).unwrap();
        let ascii = ClearTextPassword::new("pass123".into()).unwrap();
        let hashed = ascii.hash(None).unwrap();
        assert!(hashed.verify(&full_width, None));
    }

    #[test]
    fn test_from_phc_string_validates_format() {
        assert!(HashedPassword::from_phc_string("not a hash").is_err());

        let hashed = ClearTextPassword::new("abcdef1".into())
            .unwrap()
            .hash(None)
            .unwrap();
        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert_eq!(restored, hashed);
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = ClearTextPassword::new("secret123".into()).unwrap();
        assert!(!format!("{password:?}").contains("secret"));
    }
}
