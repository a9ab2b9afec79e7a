//! Roadmap HTTP surface
//!
//! Meant to be nested under `/api`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::catalog::{Roadmap, RoadmapCatalog};
use crate::error::{RoadmapError, RoadmapResult};

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

/// GET /api/roadmaps
pub async fn list_roadmaps(
    State(catalog): State<Arc<RoadmapCatalog>>,
) -> Json<DataResponse<Vec<Roadmap>>> {
    Json(DataResponse::new(catalog.all().to_vec()))
}

/// GET /api/roadmaps/{slug}
pub async fn get_roadmap(
    State(catalog): State<Arc<RoadmapCatalog>>,
    Path(slug): Path<String>,
) -> RoadmapResult<Json<DataResponse<Roadmap>>> {
    let roadmap = catalog
        .find(&slug)
        .cloned()
        .ok_or(RoadmapError::NotFound(slug))?;

    Ok(Json(DataResponse::new(roadmap)))
}

pub fn roadmap_router(catalog: RoadmapCatalog) -> Router {
    Router::new()
        .route("/roadmaps", get(list_roadmaps))
        .route("/roadmaps/{slug}", get(get_roadmap))
        .with_state(Arc::new(catalog))
}
