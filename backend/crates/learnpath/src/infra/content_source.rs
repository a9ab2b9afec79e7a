//! Content source chosen once at startup.

use crate::domain::entities::Curriculum;
use crate::domain::repository::CurriculumGenerator;
use crate::domain::value_objects::{Refinement, Topic};
use crate::error::GenerationError;
use crate::infra::mock::MockCurriculumGenerator;
use crate::infra::openai::OpenAiCurriculumGenerator;

#[derive(Debug, Clone)]
pub enum ContentSource {
    Mock(MockCurriculumGenerator),
    OpenAi(OpenAiCurriculumGenerator),
}

impl ContentSource {
    pub fn name(&self) -> &'static str {
        match self {
            ContentSource::Mock(_) => "mock",
            ContentSource::OpenAi(_) => "openai",
        }
    }
}

impl CurriculumGenerator for ContentSource {
    async fn generate(&self, topic: &Topic) -> Result<Curriculum, GenerationError> {
        match self {
            ContentSource::Mock(generator) => generator.generate(topic).await,
            ContentSource::OpenAi(generator) => generator.generate(topic).await,
        }
    }

    async fn refine(
        &self,
        topic: &Topic,
        previous: &Curriculum,
        feedback: &Refinement,
    ) -> Result<Curriculum, GenerationError> {
        match self {
            ContentSource::Mock(generator) => generator.refine(topic, previous, feedback).await,
            ContentSource::OpenAi(generator) => generator.refine(topic, previous, feedback).await,
        }
    }
}
