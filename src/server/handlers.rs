use super::error::ApiError;
use super::models::{HealthResponse, PipelineGenerationRequest};
use super::AppState;
use crate::analysis::{AnalysisReport, AnalysisRequest, GeneratedPipeline};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use std::collections::BTreeMap;
use tracing::info;

pub async fn root() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let Json(request) = payload?;
    info!(repo_url = %request.repo_url, branch = %request.branch, "Analyze request");

    let report = state.service.analyze(request).await?;
    Ok(Json(report))
}

pub async fn collect(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<BTreeMap<String, String>>, ApiError> {
    let Json(request) = payload?;
    info!(repo_url = %request.repo_url, branch = %request.branch, "Collect request");

    let files = state.service.collect(request).await?;
    Ok(Json(files))
}

pub async fn generate_pipeline(
    State(state): State<AppState>,
    payload: Result<Json<PipelineGenerationRequest>, JsonRejection>,
) -> Result<Json<GeneratedPipeline>, ApiError> {
    let Json(request) = payload?;
    info!(
        repo_url = %request.project_analysis.repo_url,
        steps = request.selected_steps.len(),
        "Pipeline generation request"
    );

    let pipeline = state
        .service
        .generate_pipeline(&request.project_analysis, &request.selected_steps)
        .await?;
    Ok(Json(pipeline))
}
