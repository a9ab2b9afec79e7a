//! Domain Layer
//!
//! - Entities (LearningPath, Curriculum, Module, Lesson)
//! - Value objects (Topic, Refinement)
//! - Cardinality rules
//! - Repository and content-source traits

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
