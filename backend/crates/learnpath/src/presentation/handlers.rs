//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::application::config::LearnPathConfig;
use crate::application::generate_path::{GeneratePathInput, GeneratePathUseCase};
use crate::application::list_history::ListHistoryUseCase;
use crate::application::path_record::{DeletePathUseCase, GetPathUseCase, parse_path_id};
use crate::application::refine_path::{RefinePathInput, RefinePathUseCase};
use crate::domain::repository::{CurriculumGenerator, LearningPathRepository};
use crate::error::{LearnPathError, LearnPathResult};
use crate::presentation::dto::{
    DataResponse, GenerateRequest, HistoryResponse, LearningPathResponse, MessageResponse,
    RefineRequest,
};

/// Shared state for learning path handlers
pub struct LearnPathAppState<R, G> {
    pub repo: Arc<R>,
    pub generator: Arc<G>,
    pub config: Arc<LearnPathConfig>,
}

impl<R, G> Clone for LearnPathAppState<R, G> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            generator: Arc::clone(&self.generator),
            config: Arc::clone(&self.config),
        }
    }
}

/// Unwraps a JSON body. Anything that is not a JSON object of the expected
/// shape is a malformed request; field values are validated later.
fn read_body<T>(payload: Result<Json<Value>, JsonRejection>) -> LearnPathResult<T>
where
    T: DeserializeOwned,
{
    let value = match payload {
        Ok(Json(value)) => value,
        Err(rejection) => {
            return Err(LearnPathError::MalformedRequest(format!(
                "Invalid JSON in request body: {}",
                rejection.body_text()
            )));
        }
    };

    if !value.is_object() {
        return Err(LearnPathError::MalformedRequest(
            "Request body must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| {
        LearnPathError::MalformedRequest(format!(
            "Request body does not match the expected structure: {e}"
        ))
    })
}

/// POST /api/learnpath (and the legacy POST /api/generate-path)
pub async fn generate_path<R, G>(
    State(state): State<LearnPathAppState<R, G>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> LearnPathResult<impl IntoResponse>
where
    R: LearningPathRepository + Send + Sync + 'static,
    G: CurriculumGenerator + Send + Sync + 'static,
{
    let req: GenerateRequest = read_body(payload)?;

    let use_case = GeneratePathUseCase::new(
        state.repo.clone(),
        state.generator.clone(),
        state.config.clone(),
    );
    let path = use_case
        .execute(GeneratePathInput {
            topic: req.topic.unwrap_or_default(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(LearningPathResponse::from(path))),
    ))
}

/// POST /api/learnpath/refine
pub async fn refine_path<R, G>(
    State(state): State<LearnPathAppState<R, G>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> LearnPathResult<impl IntoResponse>
where
    R: LearningPathRepository + Send + Sync + 'static,
    G: CurriculumGenerator + Send + Sync + 'static,
{
    let req: RefineRequest = read_body(payload)?;

    let use_case = RefinePathUseCase::new(
        state.repo.clone(),
        state.generator.clone(),
        state.config.clone(),
    );
    let path = use_case
        .execute(RefinePathInput {
            topic: req.topic.unwrap_or_default(),
            refinement: req.refinement.unwrap_or_default(),
            previous: req.previous_path,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(LearningPathResponse::from(path))),
    ))
}

/// GET /api/learnpath/history (and the legacy GET /api/paths)
pub async fn list_history<R, G>(
    State(state): State<LearnPathAppState<R, G>>,
) -> LearnPathResult<Json<HistoryResponse>>
where
    R: LearningPathRepository + Send + Sync + 'static,
    G: CurriculumGenerator + Send + Sync + 'static,
{
    let use_case = ListHistoryUseCase::new(state.repo.clone(), state.config.clone());
    let paths = use_case.execute().await?;

    let data: Vec<LearningPathResponse> = paths.into_iter().map(Into::into).collect();
    Ok(Json(HistoryResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

/// GET /api/learnpath/{id}
pub async fn get_path<R, G>(
    State(state): State<LearnPathAppState<R, G>>,
    Path(id): Path<String>,
) -> LearnPathResult<Json<DataResponse<LearningPathResponse>>>
where
    R: LearningPathRepository + Send + Sync + 'static,
    G: CurriculumGenerator + Send + Sync + 'static,
{
    let id = parse_path_id(&id)?;
    let use_case = GetPathUseCase::new(state.repo.clone(), state.config.clone());
    let path = use_case.execute(id).await?;

    Ok(Json(DataResponse::new(path.into())))
}

/// DELETE /api/learnpath/{id}
pub async fn delete_path<R, G>(
    State(state): State<LearnPathAppState<R, G>>,
    Path(id): Path<String>,
) -> LearnPathResult<Json<MessageResponse>>
where
    R: LearningPathRepository + Send + Sync + 'static,
    G: CurriculumGenerator + Send + Sync + 'static,
{
    let id = parse_path_id(&id)?;
    let use_case = DeletePathUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(id).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Learning path deleted",
    }))
}
