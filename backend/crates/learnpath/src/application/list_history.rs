//! List History Use Case

use std::sync::Arc;

use crate::application::config::LearnPathConfig;
use crate::application::with_store_timeout;
use crate::domain::entities::LearningPath;
use crate::domain::repository::LearningPathRepository;
use crate::error::LearnPathResult;

pub struct ListHistoryUseCase<R>
where
    R: LearningPathRepository,
{
    repo: Arc<R>,
    config: Arc<LearnPathConfig>,
}

impl<R> ListHistoryUseCase<R>
where
    R: LearningPathRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LearnPathConfig>) -> Self {
        Self { repo, config }
    }

    /// All stored paths, newest first.
    pub async fn execute(&self) -> LearnPathResult<Vec<LearningPath>> {
        let paths =
            with_store_timeout(self.config.store_timeout, self.repo.list_newest_first()).await?;
        tracing::debug!(count = paths.len(), "Listed learning path history");
        Ok(paths)
    }
}
