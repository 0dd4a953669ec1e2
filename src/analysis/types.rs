//! Analysis and pipeline data model
//!
//! These types are both what the model is asked to produce and what the
//! HTTP layer returns, so field names follow the JSON contract exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named technology and its version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechItem {
    pub name: String,
    pub version: String,
}

impl TechItem {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for TechItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// Tech stack summary of a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    pub repo_url: String,
    pub branch: String,
    pub tech_stack: Vec<TechItem>,
    pub project_type: String,
    pub runtime_versions: Vec<TechItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepCategory {
    Setup,
    Build,
    Test,
    Deploy,
    Optimization,
}

impl StepCategory {
    pub const ALL: [StepCategory; 5] = [
        StepCategory::Setup,
        StepCategory::Build,
        StepCategory::Test,
        StepCategory::Deploy,
        StepCategory::Optimization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepCategory::Setup => "Setup",
            StepCategory::Build => "Build",
            StepCategory::Test => "Test",
            StepCategory::Deploy => "Deploy",
            StepCategory::Optimization => "Optimization",
        }
    }
}

impl fmt::Display for StepCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One orderable unit of a CI workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStep {
    /// Stable snake_case identifier
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: StepCategory,
    pub default_command: String,
    pub optional: bool,
}

/// Result of `/analyze`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub project_analysis: ProjectAnalysis,
    /// Execution order
    pub ci_pipeline_steps: Vec<PipelineStep>,
}

/// Result of `/generate-pipeline`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPipeline {
    pub github_actions_yaml: String,
    pub manual_instructions: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_step_category_wire_names() {
        for category in StepCategory::ALL {
            let encoded = serde_json::to_value(category).unwrap();
            assert_eq!(encoded, json!(category.as_str()));
        }
        assert!(serde_json::from_value::<StepCategory>(json!("Lint")).is_err());
        assert!(serde_json::from_value::<StepCategory>(json!("setup")).is_err());
    }

    #[test]
    fn test_pipeline_suggestions_default_empty() {
        let pipeline: GeneratedPipeline = serde_json::from_value(json!({
            "github_actions_yaml": "name: CI",
            "manual_instructions": "none"
        }))
        .unwrap();
        assert!(pipeline.suggestions.is_empty());
    }

    #[test]
    fn test_project_analysis_requires_every_field() {
        let result = serde_json::from_value::<ProjectAnalysis>(json!({
            "repo_url": "https://github.com/psf/requests",
            "branch": "main",
            "tech_stack": [],
            "project_type": "library"
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("runtime_versions"), "{}", err);
    }

    #[test]
    fn test_step_optional_is_required() {
        let result = serde_json::from_value::<PipelineStep>(json!({
            "id": "install",
            "name": "Install",
            "description": "Install deps",
            "category": "Setup",
            "default_command": "pip install -r requirements.txt"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_tech_item_display() {
        assert_eq!(TechItem::new("Python", "3.12").to_string(), "Python 3.12");
    }
}
