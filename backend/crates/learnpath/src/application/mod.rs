//! Application Layer - Use Cases
//!
//! Each use case validates its input, talks to the content source and the
//! repository, and bounds every external call with a timeout.

pub mod config;
pub mod generate_path;
pub mod list_history;
pub mod path_record;
pub mod refine_path;

use std::future::Future;
use std::time::Duration;

use crate::error::{LearnPathError, LearnPathResult};

/// Runs a repository call, failing with `PersistenceTimeout` after `limit`.
pub(crate) async fn with_store_timeout<T, F>(limit: Duration, op: F) -> LearnPathResult<T>
where
    F: Future<Output = LearnPathResult<T>>,
{
    tokio::time::timeout(limit, op)
        .await
        .map_err(|_| LearnPathError::PersistenceTimeout(limit))?
}

/// Runs a content-source call, failing with `GenerationTimeout` after `limit`.
pub(crate) async fn with_generation_timeout<T, E, F>(limit: Duration, op: F) -> LearnPathResult<T>
where
    F: Future<Output = Result<T, E>>,
    LearnPathError: From<E>,
{
    match tokio::time::timeout(limit, op).await {
        Ok(result) => result.map_err(LearnPathError::from),
        Err(_) => Err(LearnPathError::GenerationTimeout(limit)),
    }
}
