//! Infrastructure Layer
//!
//! PostgreSQL persistence and the two content sources.

pub mod content_source;
pub mod mock;
pub mod openai;
pub mod postgres;
