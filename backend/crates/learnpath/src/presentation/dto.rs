//! Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Curriculum, LearningPath, Module};

/// Body of `POST /api/learnpath`.
///
/// Fields are optional so a missing field is reported as a validation issue
/// rather than a malformed body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub topic: Option<String>,
}

/// Body of `POST /api/learnpath/refine`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub refinement: Option<String>,
    #[serde(default)]
    pub previous_path: Option<Curriculum>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathResponse {
    pub id: Uuid,
    pub topic: String,
    pub modules: Vec<Module>,
    pub created_at: DateTime<Utc>,
}

impl From<LearningPath> for LearningPathResponse {
    fn from(path: LearningPath) -> Self {
        Self {
            id: path.id.into_uuid(),
            topic: path.topic.into_inner(),
            modules: path.curriculum.modules,
            created_at: path.created_at,
        }
    }
}

/// `{ "success": true, "data": ... }`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<LearningPathResponse>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}
