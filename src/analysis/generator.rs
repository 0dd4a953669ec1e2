//! Generation stage: approved analysis and steps in, workflow YAML out

use super::analyzer::DEFAULT_TEMPERATURE;
use super::error::ServiceError;
use super::prompt::{generation_prompt, GENERATION_SYSTEM_PROMPT};
use super::response::parse_pipeline;
use super::types::{GeneratedPipeline, PipelineStep, ProjectAnalysis};
use crate::llm::{ChatMessage, LLMClient, LLMRequest};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct PipelineGenerator {
    llm: Arc<dyn LLMClient>,
    temperature: f32,
}

impl PipelineGenerator {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self {
            llm,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Asks the model for a workflow implementing `steps` in the given order.
    ///
    /// A blank reply is [`ServiceError::EmptyResponse`]; a reply without
    /// `github_actions_yaml` or `manual_instructions` is a parse error.
    /// YAML that does not parse is returned with a warning logged.
    pub async fn generate(
        &self,
        analysis: &ProjectAnalysis,
        steps: &[PipelineStep],
    ) -> Result<GeneratedPipeline, ServiceError> {
        let request = LLMRequest::new(vec![
            ChatMessage::system(GENERATION_SYSTEM_PROMPT),
            ChatMessage::user(generation_prompt(analysis, steps)),
        ])
        .with_temperature(self.temperature);

        debug!(
            "Requesting workflow for {} with {} steps",
            analysis.repo_url,
            steps.len()
        );

        let response = self.llm.chat(request).await?;
        if response.is_blank() {
            warn!("Model returned an empty workflow reply");
            return Err(ServiceError::EmptyResponse);
        }

        let pipeline = parse_pipeline(&response.content)?;

        if let Err(e) = serde_yaml::from_str::<serde_yaml::Value>(&pipeline.github_actions_yaml) {
            warn!("Generated workflow is not valid YAML: {}", e);
        }

        info!(
            "Generated workflow for {} in {:?}",
            analysis.repo_url, response.response_time
        );

        Ok(pipeline)
    }
}

impl std::fmt::Debug for PipelineGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineGenerator")
            .field("llm", &self.llm.name())
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::response::ParseError;
    use crate::analysis::types::{StepCategory, TechItem};
    use crate::llm::{MessageRole, MockLLMClient, MockResponse};
    use serde_json::json;

    fn analysis() -> ProjectAnalysis {
        ProjectAnalysis {
            repo_url: "https://github.com/psf/requests".to_string(),
            branch: "main".to_string(),
            tech_stack: vec![TechItem::new("Python", "3.12")],
            project_type: "library".to_string(),
            runtime_versions: vec![],
        }
    }

    fn steps() -> Vec<PipelineStep> {
        vec![PipelineStep {
            id: "run_tests".to_string(),
            name: "Run tests".to_string(),
            description: "Run pytest".to_string(),
            category: StepCategory::Test,
            default_command: "pytest -q".to_string(),
            optional: false,
        }]
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mock = Arc::new(MockLLMClient::new());
        mock.add_response(MockResponse::text(format!(
            "```json\n{}\n```",
            json!({
                "github_actions_yaml": "name: CI\non:\n  push:\n    branches: [main]\n",
                "manual_instructions": "Nothing to configure"
            })
        )));
        let generator = PipelineGenerator::new(mock.clone());

        let pipeline = generator.generate(&analysis(), &steps()).await.unwrap();
        assert!(pipeline.github_actions_yaml.starts_with("name: CI"));
        assert!(pipeline.suggestions.is_empty());

        let user = mock.requests()[0]
            .message_content(MessageRole::User)
            .unwrap()
            .to_string();
        assert!(user.contains("Command: pytest -q"));
    }

    #[tokio::test]
    async fn test_blank_reply() {
        let mock = Arc::new(MockLLMClient::new());
        mock.add_response(MockResponse::text("  \n "));
        let generator = PipelineGenerator::new(mock);

        let err = generator.generate(&analysis(), &steps()).await.unwrap_err();
        assert!(matches!(err, ServiceError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_missing_instructions() {
        let mock = Arc::new(MockLLMClient::new());
        mock.add_response(MockResponse::json(&json!({"github_actions_yaml": "name: CI"})));
        let generator = PipelineGenerator::new(mock);

        let err = generator.generate(&analysis(), &steps()).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Parse(ParseError::MissingField(ref f)) if f == "manual_instructions"
        ));
    }

    #[tokio::test]
    async fn test_invalid_yaml_still_returned() {
        let mock = Arc::new(MockLLMClient::new());
        mock.add_response(MockResponse::json(&json!({
            "github_actions_yaml": "name: [unclosed",
            "manual_instructions": "n/a"
        })));
        let generator = PipelineGenerator::new(mock);

        let pipeline = generator.generate(&analysis(), &steps()).await.unwrap();
        assert_eq!(pipeline.github_actions_yaml, "name: [unclosed");
    }
}
