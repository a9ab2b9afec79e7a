//! User Password Value Object
//!
//! Domain wrappers over `platform::password`:
//! - [`RawPassword`]: user input, policy checked, zeroized on drop
//! - [`UserPassword`]: Argon2id PHC string, safe to store

use std::fmt;

use kernel::error::field_issue::FieldIssue;
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input. Never `Clone`, redacted in `Debug`.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// NFKC-normalizes and checks length (6..=128 code points) and characters.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        ClearTextPassword::new(raw).map(Self)
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Policy failures are reported against the `password` field.
pub fn password_issue(err: PasswordPolicyError) -> FieldIssue {
    FieldIssue::new("password", err.to_string())
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> Result<Self, PasswordHashError> {
        raw.inner().hash(pepper).map(Self)
    }

    /// Parses a PHC string read back from the database.
    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc_string).map(Self)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification. `pepper` must match the one used to hash.
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("secret1".to_string()).is_ok());
        assert!(RawPassword::new("a".repeat(MIN_PASSWORD_LENGTH)).is_ok());

        assert_eq!(
            RawPassword::new("a".repeat(MIN_PASSWORD_LENGTH - 1)).unwrap_err(),
            PasswordPolicyError::TooShort { min: 6 }
        );
        assert_eq!(
            RawPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1)).unwrap_err(),
            PasswordPolicyError::TooLong { max: 128 }
        );
        assert_eq!(
            RawPassword::new("".to_string()).unwrap_err(),
            PasswordPolicyError::EmptyOrWhitespace
        );
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        assert!(hashed.verify(&raw, None));

        let wrong = RawPassword::new("WrongPassword123!".to_string()).unwrap();
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, Some(b"pepper")).unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();

        assert!(restored.verify(&raw, Some(b"pepper")));
        assert!(!restored.verify(&raw, None));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword123!".to_string()).unwrap();
        let debug = format!("{raw:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));
    }

    #[test]
    fn test_policy_message_targets_password_field() {
        let issue = password_issue(PasswordPolicyError::TooShort { min: 6 });
        assert_eq!(issue.field, "password");
        assert_eq!(issue.message, "Password must be at least 6 characters");
    }
}
