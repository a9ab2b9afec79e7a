//! Domain Value Objects
//!
//! Validated request inputs. Both are trimmed before their length is checked,
//! so whitespace-only input is rejected as empty.

use std::fmt;

pub use kernel::error::field_issue::FieldIssue;

pub const TOPIC_MAX_CHARS: usize = 100;
pub const REFINEMENT_MAX_CHARS: usize = 500;

/// Subject of a learning path (1..=100 characters after trimming).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic(String);

impl Topic {
    pub fn parse(raw: &str) -> Result<Self, FieldIssue> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldIssue::new("topic", "Topic is required"));
        }
        if trimmed.chars().count() > TOPIC_MAX_CHARS {
            return Err(FieldIssue::new(
                "topic",
                format!("Topic must be at most {TOPIC_MAX_CHARS} characters"),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wraps a value read back from storage.
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text feedback used to refine an existing path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refinement(String);

impl Refinement {
    pub fn parse(raw: &str) -> Result<Self, FieldIssue> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldIssue::new(
                "refinement",
                "Refinement instruction is required",
            ));
        }
        if trimmed.chars().count() > REFINEMENT_MAX_CHARS {
            return Err(FieldIssue::new(
                "refinement",
                format!("Refinement must be at most {REFINEMENT_MAX_CHARS} characters"),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `n` characters, respecting char boundaries.
    pub fn excerpt(&self, n: usize) -> &str {
        match self.0.char_indices().nth(n) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_is_trimmed() {
        let topic = Topic::parse("  React Hooks \n").unwrap();
        assert_eq!(topic.as_str(), "React Hooks");
    }

    #[test]
    fn test_topic_bounds() {
        assert_eq!(Topic::parse("").unwrap_err().field, "topic");
        assert!(Topic::parse("   \t").is_err());
        assert!(Topic::parse(&"a".repeat(100)).is_ok());
        assert!(Topic::parse(&"a".repeat(101)).is_err());
        // padding does not count against the limit
        assert!(Topic::parse(&format!("  {}  ", "a".repeat(100))).is_ok());
    }

    #[test]
    fn test_topic_counts_characters_not_bytes() {
        assert!(Topic::parse(&"é".repeat(100)).is_ok());
    }

    #[test]
    fn test_refinement_bounds() {
        assert!(Refinement::parse(&"x".repeat(500)).is_ok());
        let err = Refinement::parse(&"x".repeat(501)).unwrap_err();
        assert_eq!(err.field, "refinement");
        assert!(Refinement::parse("  ").is_err());
    }

    #[test]
    fn test_refinement_excerpt() {
        let refinement = Refinement::parse("add more exercises").unwrap();
        assert_eq!(refinement.excerpt(3), "add");
        assert_eq!(refinement.excerpt(50), "add more exercises");

        let unicode = Refinement::parse("ñandú ñandú").unwrap();
        assert_eq!(unicode.excerpt(4), "ñand");
    }
}
