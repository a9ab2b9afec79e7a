//! Generate Path Use Case

use std::sync::Arc;

use crate::application::config::LearnPathConfig;
use crate::application::{with_generation_timeout, with_store_timeout};
use crate::domain::entities::LearningPath;
use crate::domain::repository::{CurriculumGenerator, LearningPathRepository};
use crate::domain::value_objects::Topic;
use crate::error::{GenerationError, LearnPathError, LearnPathResult};

#[derive(Debug, Clone)]
pub struct GeneratePathInput {
    pub topic: String,
}

pub struct GeneratePathUseCase<R, G>
where
    R: LearningPathRepository,
    G: CurriculumGenerator,
{
    repo: Arc<R>,
    generator: Arc<G>,
    config: Arc<LearnPathConfig>,
}

impl<R, G> GeneratePathUseCase<R, G>
where
    R: LearningPathRepository,
    G: CurriculumGenerator,
{
    pub fn new(repo: Arc<R>, generator: Arc<G>, config: Arc<LearnPathConfig>) -> Self {
        Self {
            repo,
            generator,
            config,
        }
    }

    /// Validates the topic, generates a curriculum for it and stores the
    /// result. Nothing reaches the content source unless the topic is valid.
    pub async fn execute(&self, input: GeneratePathInput) -> LearnPathResult<LearningPath> {
        let topic = Topic::parse(&input.topic).map_err(LearnPathError::validation)?;

        let curriculum = with_generation_timeout(
            self.config.generation_timeout,
            self.generator.generate(&topic),
        )
        .await?;

        let path = LearningPath::new(topic, curriculum)
            .map_err(GenerationError::InvalidStructure)?;

        with_store_timeout(self.config.store_timeout, self.repo.create(&path)).await?;

        tracing::info!(
            learning_path_id = %path.id,
            topic = %path.topic,
            modules = path.modules().len(),
            lessons = path.curriculum.lesson_count(),
            "Generated learning path"
        );

        Ok(path)
    }
}
