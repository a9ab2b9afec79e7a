//! Shared kernel for the LearnX backend.
//!
//! Holds the vocabulary every domain crate agrees on:
//! - the HTTP-facing error type ([`error::app_error::AppError`]) and its
//!   status classification ([`error::kind::ErrorKind`])
//! - typed entity identifiers ([`id::Id`])
//!
//! Anything domain specific (learning paths, accounts, roadmaps) lives in its
//! own crate and only converts into these types at the boundary.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod field_issue;
    pub mod kind;
}
pub mod id;
