//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Account sign up / sign in with email + password
//! - Server-side sessions referenced by an HMAC-signed, HttpOnly cookie
//! - Profile read/update (display name, avatar URL) for the signed-in user
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Unknown email and wrong password are indistinguishable to the caller
//! - "Remember me" sessions last 30 days and slide; others last 12 hours

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::AuthenticatedUser;
pub use presentation::router::{
    auth_router, auth_router_generic, profile_router, profile_router_generic,
};
