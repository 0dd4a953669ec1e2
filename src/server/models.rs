//! Request and response bodies owned by the HTTP layer

use crate::analysis::{PipelineStep, ProjectAnalysis};
use serde::{Deserialize, Serialize};

pub const WELCOME_MESSAGE: &str = "Welcome to Pipeline AI Backend Service";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "200 OK".to_string(),
            message: WELCOME_MESSAGE.to_string(),
        }
    }
}

/// Body of `POST /generate-pipeline`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineGenerationRequest {
    pub project_analysis: ProjectAnalysis,
    /// Execution order; never re-sorted
    pub selected_steps: Vec<PipelineStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
