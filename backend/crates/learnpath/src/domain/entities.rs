//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::LearningPathId;
use serde::{Deserialize, Serialize};

use crate::domain::services::{CurriculumViolation, validate_curriculum};
use crate::domain::value_objects::Topic;

/// Smallest unit of a curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    pub summary: String,
}

/// Ordered group of lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub title: String,
    pub lessons: Vec<Lesson>,
}

/// The `{ "modules": [...] }` document a content source produces.
///
/// A curriculum fresh from a content source is unchecked; it only becomes
/// part of a [`LearningPath`] after passing [`validate_curriculum`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Curriculum {
    pub modules: Vec<Module>,
}

impl Curriculum {
    pub fn new(modules: Vec<Module>) -> Self {
        Self { modules }
    }

    /// Trims surrounding whitespace from every title and summary.
    pub fn normalized(mut self) -> Self {
        for module in &mut self.modules {
            trim_in_place(&mut module.title);
            for lesson in &mut module.lessons {
                trim_in_place(&mut lesson.title);
                trim_in_place(&mut lesson.summary);
            }
        }
        self
    }

    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }
}

fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}

/// A persisted learning path. Never mutated after creation; refining a path
/// produces a new record.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningPath {
    pub id: LearningPathId,
    pub topic: Topic,
    pub curriculum: Curriculum,
    pub created_at: DateTime<Utc>,
}

impl LearningPath {
    /// Builds a new record, enforcing the cardinality rules.
    pub fn new(topic: Topic, curriculum: Curriculum) -> Result<Self, Vec<CurriculumViolation>> {
        let curriculum = curriculum.normalized();
        validate_curriculum(&curriculum)?;

        Ok(Self {
            id: LearningPathId::new(),
            topic,
            curriculum,
            created_at: Utc::now(),
        })
    }

    /// Rehydrates a stored record without re-validating it.
    pub fn restore(
        id: LearningPathId,
        topic: Topic,
        curriculum: Curriculum,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            topic,
            curriculum,
            created_at,
        }
    }

    pub fn modules(&self) -> &[Module] {
        &self.curriculum.modules
    }
}
