//! Refine Path Use Case

use std::sync::Arc;

use crate::application::config::LearnPathConfig;
use crate::application::{with_generation_timeout, with_store_timeout};
use crate::domain::entities::{Curriculum, LearningPath};
use crate::domain::repository::{CurriculumGenerator, LearningPathRepository};
use crate::domain::services::validate_curriculum;
use crate::domain::value_objects::{FieldIssue, Refinement, Topic};
use crate::error::{GenerationError, LearnPathError, LearnPathResult};

#[derive(Debug, Clone)]
pub struct RefinePathInput {
    pub topic: String,
    pub refinement: String,
    /// The curriculum being refined, as last shown to the user.
    pub previous: Option<Curriculum>,
}

pub struct RefinePathUseCase<R, G>
where
    R: LearningPathRepository,
    G: CurriculumGenerator,
{
    repo: Arc<R>,
    generator: Arc<G>,
    config: Arc<LearnPathConfig>,
}

impl<R, G> RefinePathUseCase<R, G>
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

    /// Produces and stores a new path under the same topic. The previous
    /// record, if any, is left untouched.
    pub async fn execute(&self, input: RefinePathInput) -> LearnPathResult<LearningPath> {
        let (topic, refinement, previous) = validate(input)?;

        let curriculum = with_generation_timeout(
            self.config.generation_timeout,
            self.generator.refine(&topic, &previous, &refinement),
        )
        .await?;

        let path = LearningPath::new(topic, curriculum)
            .map_err(GenerationError::InvalidStructure)?;

        with_store_timeout(self.config.store_timeout, self.repo.create(&path)).await?;

        tracing::info!(
            learning_path_id = %path.id,
            topic = %path.topic,
            modules = path.modules().len(),
            "Refined learning path"
        );

        Ok(path)
    }
}

/// Collects every field problem instead of failing on the first. The previous
/// path must itself satisfy the curriculum rules.
fn validate(input: RefinePathInput) -> LearnPathResult<(Topic, Refinement, Curriculum)> {
    let mut issues = Vec::new();

    let topic = Topic::parse(&input.topic).map_err(|e| issues.push(e)).ok();
    let refinement = Refinement::parse(&input.refinement)
        .map_err(|e| issues.push(e))
        .ok();
    let previous = match input.previous {
        Some(previous) => match validate_curriculum(&previous) {
            Ok(()) => Some(previous),
            Err(violations) => {
                issues.extend(violations.into_iter().map(|violation| {
                    FieldIssue::new("previousPath.modules", violation.to_string())
                }));
                None
            }
        },
        None => {
            issues.push(FieldIssue::new(
                "previousPath",
                "Previous learning path is required",
            ));
            None
        }
    };

    match (topic, refinement, previous) {
        (Some(topic), Some(refinement), Some(previous)) => Ok((topic, refinement, previous)),
        _ => Err(LearnPathError::Validation(issues)),
    }
}
