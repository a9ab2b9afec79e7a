//! Platform crate: technical building blocks shared by the domain crates.
//!
//! - [`rate_limit`]: in-process fixed-window limiter and its sweeper task
//! - [`client`]: deriving a client identifier from proxy headers
//! - [`cookie`]: session cookie parsing and `Set-Cookie` construction
//! - [`password`]: Argon2id hashing of account passwords

pub mod client;
pub mod cookie;
pub mod password;
pub mod rate_limit;
