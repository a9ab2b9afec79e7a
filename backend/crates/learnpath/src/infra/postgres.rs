//! PostgreSQL Repository Implementation
//!
//! Paths are stored one row each; the module tree lives in a JSONB column.

use chrono::{DateTime, Utc};
use kernel::id::LearningPathId;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entities::{Curriculum, LearningPath, Module};
use crate::domain::repository::LearningPathRepository;
use crate::domain::value_objects::Topic;
use crate::error::LearnPathResult;

#[derive(Clone)]
pub struct PgLearningPathRepository {
    pool: PgPool,
}

impl PgLearningPathRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl LearningPathRepository for PgLearningPathRepository {
    async fn create(&self, path: &LearningPath) -> LearnPathResult<()> {
        sqlx::query(
            r#"
            INSERT INTO learning_paths (
                learning_path_id,
                topic,
                modules,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(path.id.into_uuid())
        .bind(path.topic.as_str())
        .bind(Json(&path.curriculum.modules))
        .bind(path.created_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(
            learning_path_id = %path.id,
            topic = %path.topic,
            modules = path.curriculum.modules.len(),
            "Learning path stored"
        );

        Ok(())
    }

    async fn find_by_id(&self, id: LearningPathId) -> LearnPathResult<Option<LearningPath>> {
        let row = sqlx::query_as::<_, LearningPathRow>(
            r#"
            SELECT learning_path_id, topic, modules, created_at
            FROM learning_paths
            WHERE learning_path_id = $1
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(LearningPathRow::into_learning_path))
    }

    async fn list_newest_first(&self) -> LearnPathResult<Vec<LearningPath>> {
        let rows = sqlx::query_as::<_, LearningPathRow>(
            r#"
            SELECT learning_path_id, topic, modules, created_at
            FROM learning_paths
            ORDER BY created_at DESC, learning_path_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(LearningPathRow::into_learning_path)
            .collect())
    }

    async fn delete(&self, id: LearningPathId) -> LearnPathResult<bool> {
        let deleted = sqlx::query("DELETE FROM learning_paths WHERE learning_path_id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted > 0 {
            tracing::info!(learning_path_id = %id, "Learning path deleted");
        }

        Ok(deleted > 0)
    }
}

#[derive(sqlx::FromRow)]
struct LearningPathRow {
    learning_path_id: Uuid,
    topic: String,
    modules: Json<Vec<Module>>,
    created_at: DateTime<Utc>,
}

impl LearningPathRow {
    fn into_learning_path(self) -> LearningPath {
        LearningPath::restore(
            LearningPathId::from_uuid(self.learning_path_id),
            Topic::from_stored(self.topic),
            Curriculum::new(self.modules.0),
            self.created_at,
        )
    }
}
