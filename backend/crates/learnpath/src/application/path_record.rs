//! Single-record use cases: fetch and delete by id.

use std::sync::Arc;

use kernel::id::LearningPathId;

use crate::application::config::LearnPathConfig;
use crate::application::with_store_timeout;
use crate::domain::entities::LearningPath;
use crate::domain::repository::LearningPathRepository;
use crate::error::{LearnPathError, LearnPathResult};

/// Parses a path id from the URL. Anything that is not a UUID is malformed.
pub fn parse_path_id(raw: &str) -> LearnPathResult<LearningPathId> {
    LearningPathId::parse(raw)
        .ok_or_else(|| LearnPathError::MalformedRequest(format!("Invalid learning path id: {raw}")))
}

pub struct GetPathUseCase<R>
where
    R: LearningPathRepository,
{
    repo: Arc<R>,
    config: Arc<LearnPathConfig>,
}

impl<R> GetPathUseCase<R>
where
    R: LearningPathRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LearnPathConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, id: LearningPathId) -> LearnPathResult<LearningPath> {
        with_store_timeout(self.config.store_timeout, self.repo.find_by_id(id))
            .await?
            .ok_or(LearnPathError::NotFound)
    }
}

pub struct DeletePathUseCase<R>
where
    R: LearningPathRepository,
{
    repo: Arc<R>,
    config: Arc<LearnPathConfig>,
}

impl<R> DeletePathUseCase<R>
where
    R: LearningPathRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LearnPathConfig>) -> Self {
        Self { repo, config }
    }

    /// `NotFound` when no record had this id.
    pub async fn execute(&self, id: LearningPathId) -> LearnPathResult<()> {
        let deleted = with_store_timeout(self.config.store_timeout, self.repo.delete(id)).await?;
        if !deleted {
            return Err(LearnPathError::NotFound);
        }
        Ok(())
    }
}
