//! GenAI-based LLM client implementation
//!
//! This module provides an LLM client implementation using the `genai` crate,
//! supporting multiple providers (Gemini, OpenAI, Anthropic, Ollama, Groq, xAI).
//! The endpoint, model and API key are injected at construction; nothing here
//! reads provider credentials from hard-coded values.

use super::client::LLMClient;
use super::error::BackendError;
use super::types::{ChatMessage, LLMRequest, LLMResponse, MessageRole};
use crate::config::PipewrightConfig;
use async_trait::async_trait;
use genai::adapter::AdapterKind;
use genai::chat::{ChatMessage as GenAIChatMessage, ChatOptions, ChatRequest as GenAIChatRequest};
use genai::resolver::{AuthData, Endpoint, ServiceTargetResolver};
use genai::{Client, ModelIden, ServiceTarget};
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// GenAI-based LLM client supporting multiple providers
pub struct GenAIClient {
    client: Client,
    model: String,
    provider: AdapterKind,
    timeout: Duration,
}

impl GenAIClient {
    /// Creates a new GenAI client
    ///
    /// # Arguments
    ///
    /// * `provider` - LLM provider to use
    /// * `model` - Model name (without provider prefix)
    /// * `api_key` - Credential for the provider; falls back to the provider's
    ///   standard environment variable when `None`
    /// * `endpoint` - Base URL override for proxies or self-hosted gateways
    /// * `timeout` - Request timeout
    pub fn new(
        provider: AdapterKind,
        model: String,
        api_key: Option<String>,
        endpoint: Option<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        if model.trim().is_empty() {
            return Err(BackendError::ConfigurationError {
                message: "model name cannot be empty".to_string(),
            });
        }

        debug!(
            "Creating GenAI client: provider={}, model={}, custom_endpoint={}",
            provider.as_str(),
            model,
            endpoint.is_some()
        );

        let model_name = model.clone();
        let endpoint_override = endpoint;
        let key_override = api_key;
        let resolver = ServiceTargetResolver::from_resolver_fn(
            move |service_target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
                let ServiceTarget {
                    endpoint: default_endpoint,
                    auth: default_auth,
                    ..
                } = service_target;

                let endpoint = match endpoint_override.as_ref() {
                    Some(url) => Endpoint::from_owned(url.clone()),
                    None => default_endpoint,
                };

                let auth = match key_override.as_ref() {
                    Some(key) => AuthData::from_single(key.clone()),
                    None => default_auth,
                };

                Ok(ServiceTarget {
                    endpoint,
                    auth,
                    model: ModelIden::new(provider, model_name.clone()),
                })
            },
        );

        let client = Client::builder()
            .with_service_target_resolver(resolver)
            .build();

        Ok(Self {
            client,
            model,
            provider,
            timeout,
        })
    }

    /// Builds a client from the service configuration
    pub fn from_config(config: &PipewrightConfig) -> Result<Self, BackendError> {
        Self::new(
            config.provider,
            config.model.clone(),
            config.api_key.clone(),
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn convert_message(msg: &ChatMessage) -> GenAIChatMessage {
        match msg.role {
            MessageRole::System => GenAIChatMessage::system(&msg.content),
            MessageRole::User => GenAIChatMessage::user(&msg.content),
            MessageRole::Assistant => GenAIChatMessage::assistant(&msg.content),
        }
    }
}

#[async_trait]
impl LLMClient for GenAIClient {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
        let start = Instant::now();

        let messages: Vec<GenAIChatMessage> =
            request.messages.iter().map(Self::convert_message).collect();
        let genai_request = GenAIChatRequest::new(messages);

        let mut options = ChatOptions::default();
        if let Some(temp) = request.temperature {
            options = options.with_temperature(temp as f64);
        }

        let response = match tokio::time::timeout(
            self.timeout,
            self.client
                .exec_chat(&self.model, genai_request, Some(&options)),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                error!("{} API error: {}", self.provider.as_str(), e);
                return Err(BackendError::ApiError {
                    message: format!("{} request failed: {}", self.provider.as_str(), e),
                    status_code: None,
                });
            }
            Err(_) => {
                error!(
                    "{} request timed out after {}s",
                    self.provider.as_str(),
                    self.timeout.as_secs()
                );
                return Err(BackendError::TimeoutError {
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        let content = response.first_text().unwrap_or_default().to_string();

        debug!(
            "{} responded with {} chars in {:?}",
            self.provider.as_str(),
            content.len(),
            start.elapsed()
        );

        Ok(LLMResponse::text(content, start.elapsed()))
    }

    fn name(&self) -> &str {
        self.provider.as_str()
    }

    fn model_info(&self) -> Option<String> {
        Some(self.model.clone())
    }
}

impl std::fmt::Debug for GenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAIClient")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}
