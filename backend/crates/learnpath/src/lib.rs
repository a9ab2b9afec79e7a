//! Learning path backend module
//!
//! Clean Architecture structure:
//! - `domain/` - Curriculum entities, input value objects, cardinality rules, traits
//! - `application/` - Generate, refine, history and single-record use cases
//! - `infra/` - PostgreSQL store, mock and completion-service content sources
//! - `presentation/` - HTTP handlers, rate-limit middleware, router
//!
//! A curriculum is only stored after it passes the cardinality rules
//! (4-7 modules, 3-5 lessons each). Generation and refinement are rate
//! limited per client before any work is done.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::LearnPathConfig;
pub use error::{GenerationError, LearnPathError, LearnPathResult};
pub use infra::content_source::ContentSource;
pub use infra::mock::MockCurriculumGenerator;
pub use infra::openai::{OpenAiConfig, OpenAiCurriculumGenerator};
pub use infra::postgres::PgLearningPathRepository;
pub use presentation::router::{learnpath_router, learnpath_router_generic};

#[cfg(test)]
mod tests;
