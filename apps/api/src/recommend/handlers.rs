//! Axum route handlers for the Recommendation API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::job::JobRecord;
use crate::recommend::pipeline::{recommend, RecommendRequest, RecommendationResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub total: usize,
    pub jobs: Vec<JobRecord>,
}

/// POST /api/v1/recommendations
///
/// Matches the submitted skills against the dataset, adds AI suggestions, and
/// returns one ordered list: dataset entries first, then AI entries.
/// Bodies that fail to parse are reported as validation errors, like empty input.
pub async fn handle_recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    let response = recommend(
        &state.dataset,
        state.llm.as_ref(),
        &state.settings,
        request,
    )
    .await?;

    Ok(Json(response))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<JobListResponse> {
    Json(JobListResponse {
        total: state.dataset.len(),
        jobs: state.dataset.jobs().to_vec(),
    })
}

/// GET /api/v1/jobs/:title
///
/// Title lookup is case-insensitive.
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<JobRecord>, AppError> {
    state
        .dataset
        .find_by_title(&title)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job '{title}' not found")))
}
