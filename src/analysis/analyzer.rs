//! Analysis stage: snapshot in, tech stack and candidate steps out

use super::error::ServiceError;
use super::prompt::{analysis_prompt, ANALYSIS_SYSTEM_PROMPT};
use super::response::parse_analysis;
use super::types::AnalysisReport;
use crate::llm::{ChatMessage, LLMClient, LLMRequest};
use crate::repo::RepoLocator;
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_TEMPERATURE: f32 = 0.1;

pub struct ProjectAnalyzer {
    llm: Arc<dyn LLMClient>,
    temperature: f32,
}

impl ProjectAnalyzer {
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

    /// Sends the snapshot to the model and returns its raw reply
    pub async fn analyze(
        &self,
        repo_url: &str,
        locator: &RepoLocator,
        snapshot: &str,
    ) -> Result<String, ServiceError> {
        let request = LLMRequest::new(vec![
            ChatMessage::system(ANALYSIS_SYSTEM_PROMPT),
            ChatMessage::user(analysis_prompt(repo_url, locator, snapshot)),
        ])
        .with_temperature(self.temperature);

        debug!(
            "Requesting analysis of {} from {} ({} snapshot chars)",
            locator,
            self.llm.name(),
            snapshot.len()
        );

        let response = self.llm.chat(request).await?;

        info!(
            "Analysis of {} completed in {:?}",
            locator, response.response_time
        );

        Ok(response.content)
    }

    /// [`ProjectAnalyzer::analyze`] followed by typed parsing
    pub async fn analyze_report(
        &self,
        repo_url: &str,
        locator: &RepoLocator,
        snapshot: &str,
    ) -> Result<AnalysisReport, ServiceError> {
        let raw = self.analyze(repo_url, locator, snapshot).await?;
        Ok(parse_analysis(&raw)?)
    }
}

impl std::fmt::Debug for ProjectAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectAnalyzer")
            .field("llm", &self.llm.name())
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{BackendError, MessageRole, MockLLMClient, MockResponse};
    use serde_json::json;

    fn report_json() -> serde_json::Value {
        json!({
            "project_analysis": {
                "repo_url": "https://github.com/psf/requests",
                "branch": "main",
                "tech_stack": [{"name": "Python", "version": "3.12"}],
                "project_type": "library",
                "runtime_versions": []
            },
            "ci_pipeline_steps": []
        })
    }

    #[tokio::test]
    async fn test_analyze_sends_two_messages() {
        let mock = Arc::new(MockLLMClient::new());
        mock.add_response(MockResponse::json(&report_json()));
        let analyzer = ProjectAnalyzer::new(mock.clone()).with_temperature(0.3);

        let locator = RepoLocator::new("psf", "requests", "main");
        let report = analyzer
            .analyze_report("https://github.com/psf/requests", &locator, "File: README.md\n# Requests")
            .await
            .unwrap();
        assert_eq!(report.project_analysis.project_type, "library");

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages.len(), 2);
        assert_eq!(requests[0].temperature, Some(0.3));
        assert_eq!(
            requests[0].message_content(MessageRole::System),
            Some(ANALYSIS_SYSTEM_PROMPT)
        );
        assert!(requests[0]
            .message_content(MessageRole::User)
            .unwrap()
            .contains("# Requests"));
    }

    #[tokio::test]
    async fn test_backend_failure_is_fatal() {
        let mock = Arc::new(MockLLMClient::new());
        mock.add_response(MockResponse::error(BackendError::TimeoutError { seconds: 120 }));
        let analyzer = ProjectAnalyzer::new(mock);

        let locator = RepoLocator::new("psf", "requests", "main");
        let err = analyzer
            .analyze("https://github.com/psf/requests", &locator, "")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Backend(BackendError::TimeoutError { .. })));
    }

    #[tokio::test]
    async fn test_unparseable_reply() {
        let mock = Arc::new(MockLLMClient::new());
        mock.add_response(MockResponse::text("Sorry, I cannot help."));
        let analyzer = ProjectAnalyzer::new(mock);

        let locator = RepoLocator::new("psf", "requests", "main");
        let err = analyzer
            .analyze_report("https://github.com/psf/requests", &locator, "")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Parse(_)));
    }
}
