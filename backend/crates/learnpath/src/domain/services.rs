//! Domain Services
//!
//! Structural rules every curriculum must satisfy before it is stored.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::domain::entities::Curriculum;

pub const MODULES_PER_PATH: RangeInclusive<usize> = 4..=7;
pub const LESSONS_PER_MODULE: RangeInclusive<usize> = 3..=5;
pub const MIN_SUMMARY_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurriculumViolation {
    #[error("Learning path must have between 4 and 7 modules (got {0})")]
    ModuleCount(usize),

    #[error("Module {module} must have between 3 and 5 lessons (got {count})")]
    LessonCount { module: usize, count: usize },

    #[error("Module {module} title is required")]
    EmptyModuleTitle { module: usize },

    #[error("Lesson {module}.{lesson} title is required")]
    EmptyLessonTitle { module: usize, lesson: usize },

    #[error("Lesson {module}.{lesson} summary must be at least 10 characters")]
    ShortSummary { module: usize, lesson: usize },
}

/// Checks module and lesson cardinality plus non-empty text.
///
/// Reports every violation rather than stopping at the first one. Indices in
/// messages are 1-based.
pub fn validate_curriculum(curriculum: &Curriculum) -> Result<(), Vec<CurriculumViolation>> {
    let mut violations = Vec::new();

    if !MODULES_PER_PATH.contains(&curriculum.modules.len()) {
        violations.push(CurriculumViolation::ModuleCount(curriculum.modules.len()));
    }

    for (m, module) in curriculum.modules.iter().enumerate() {
        let module_no = m + 1;
        if module.title.trim().is_empty() {
            violations.push(CurriculumViolation::EmptyModuleTitle { module: module_no });
        }
        if !LESSONS_PER_MODULE.contains(&module.lessons.len()) {
            violations.push(CurriculumViolation::LessonCount {
                module: module_no,
                count: module.lessons.len(),
            });
        }
        for (l, lesson) in module.lessons.iter().enumerate() {
            if lesson.title.trim().is_empty() {
                violations.push(CurriculumViolation::EmptyLessonTitle {
                    module: module_no,
                    lesson: l + 1,
                });
            }
            if lesson.summary.trim().chars().count() < MIN_SUMMARY_CHARS {
                violations.push(CurriculumViolation::ShortSummary {
                    module: module_no,
                    lesson: l + 1,
                });
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
