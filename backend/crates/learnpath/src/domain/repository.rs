//! Repository Traits
//!
//! Persistence and content-source seams. Implementations live in `infra`.

use crate::domain::entities::{Curriculum, LearningPath};
use crate::domain::value_objects::{Refinement, Topic};
use crate::error::{GenerationError, LearnPathResult};
use kernel::id::LearningPathId;

/// Learning path store
#[trait_variant::make(LearningPathRepository: Send)]
pub trait LocalLearningPathRepository {
    async fn create(&self, path: &LearningPath) -> LearnPathResult<()>;

    async fn find_by_id(&self, id: LearningPathId) -> LearnPathResult<Option<LearningPath>>;

    /// Every stored path, newest first. Ties on `created_at` are broken by id
    /// so repeated reads return the same order.
    async fn list_newest_first(&self) -> LearnPathResult<Vec<LearningPath>>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: LearningPathId) -> LearnPathResult<bool>;
}

/// Something that can write curricula: the completion service or the
/// template-based mock.
#[trait_variant::make(CurriculumGenerator: Send)]
pub trait LocalCurriculumGenerator {
    async fn generate(&self, topic: &Topic) -> Result<Curriculum, GenerationError>;

    async fn refine(
        &self,
        topic: &Topic,
        previous: &Curriculum,
        feedback: &Refinement,
    ) -> Result<Curriculum, GenerationError>;
}
