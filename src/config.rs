//! Configuration management for pipewright
//!
//! Settings are loaded from environment variables with sensible defaults.
//! The LLM endpoint, model and credential are part of this configuration and
//! are handed to the LLM client at construction time.
//!
//! # Environment Variables
//!
//! ## Server
//! - `PIPEWRIGHT_HOST`: Bind address - default: "0.0.0.0"
//! - `PIPEWRIGHT_PORT`: Bind port - default: "8000"
//! - `PIPEWRIGHT_LOG_LEVEL`: Logging level - default: "info"
//!
//! ## LLM
//! - `PIPEWRIGHT_PROVIDER`: Provider (gemini|openai|anthropic|ollama|groq|xai) - default: "gemini"
//! - `PIPEWRIGHT_MODEL`: Model name - default: "gemini-2.0-flash"
//! - `PIPEWRIGHT_API_KEY`: Provider credential. When unset, the provider's standard
//!   variable (`GEMINI_API_KEY`, `OPENAI_API_KEY`, ...) is read by genai
//! - `PIPEWRIGHT_API_BASE_URL`: Endpoint override for proxies or gateways
//! - `PIPEWRIGHT_TEMPERATURE`: Sampling temperature - default: "0.1"
//! - `PIPEWRIGHT_REQUEST_TIMEOUT`: LLM timeout in seconds - default: "120"
//!
//! ## Repository host
//! - `PIPEWRIGHT_GITHUB_API`: REST API base - default: "https://api.github.com"
//! - `PIPEWRIGHT_GITHUB_HOST`: Web host accepted in repository URLs - default: "github.com"
//! - `PIPEWRIGHT_GITHUB_TIMEOUT`: Per-call timeout in seconds - default: "10"
//! - `PIPEWRIGHT_FETCH_CONCURRENCY`: Parallel file fetches per request - default: "8"
//!
//! # Example
//!
//! ```no_run
//! use pipewright::PipewrightConfig;
//!
//! let config = PipewrightConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use genai::adapter::AdapterKind;
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_PROVIDER: AdapterKind = AdapterKind::Gemini;
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_TEMPERATURE: f32 = 0.1;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_GITHUB_API: &str = "https://api.github.com";
const DEFAULT_GITHUB_HOST: &str = "github.com";
const DEFAULT_GITHUB_TIMEOUT_SECS: u64 = 10;
const DEFAULT_FETCH_CONCURRENCY: usize = 8;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid provider name
    #[error("Invalid provider: {0}. Valid options: gemini, openai, anthropic, ollama, groq, xai")]
    InvalidProvider(String),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Main configuration structure for pipewright
///
/// Constructed with `Default::default()`, which reads `PIPEWRIGHT_*`
/// environment variables and falls back to defaults. Use
/// [`PipewrightConfig::from_env`] to surface malformed values as errors
/// instead of silently using defaults.
#[derive(Clone)]
pub struct PipewrightConfig {
    /// Address the HTTP server binds to
    pub host: String,

    /// Port the HTTP server binds to
    pub port: u16,

    /// LLM provider (from genai)
    pub provider: AdapterKind,

    /// Model name to use for inference (provider-specific)
    pub model: String,

    /// Provider credential; `None` defers to the provider's standard env var
    pub api_key: Option<String>,

    /// Provider endpoint override
    pub api_base_url: Option<String>,

    /// Sampling temperature for both analysis and generation prompts
    pub temperature: f32,

    /// LLM request timeout in seconds
    pub request_timeout_secs: u64,

    /// Repository host REST API base URL
    pub github_api_base: String,

    /// Web host accepted in repository URLs
    pub github_host: String,

    /// Per-call repository host timeout in seconds
    pub github_timeout_secs: u64,

    /// Maximum concurrent file-content fetches per request
    pub fetch_concurrency: usize,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for PipewrightConfig {
    /// Loads from environment variables, ignoring values that fail to parse
    fn default() -> Self {
        let provider = env::var("PIPEWRIGHT_PROVIDER")
            .ok()
            .and_then(|s| parse_provider(&s).ok())
            .unwrap_or(DEFAULT_PROVIDER);

        Self {
            host: env_string("PIPEWRIGHT_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env_parsed("PIPEWRIGHT_PORT").unwrap_or(DEFAULT_PORT),
            provider,
            model: env_string("PIPEWRIGHT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key: env_string("PIPEWRIGHT_API_KEY"),
            api_base_url: env_string("PIPEWRIGHT_API_BASE_URL"),
            temperature: env_parsed("PIPEWRIGHT_TEMPERATURE").unwrap_or(DEFAULT_TEMPERATURE),
            request_timeout_secs: env_parsed("PIPEWRIGHT_REQUEST_TIMEOUT")
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            github_api_base: env_string("PIPEWRIGHT_GITHUB_API")
                .unwrap_or_else(|| DEFAULT_GITHUB_API.to_string()),
            github_host: env_string("PIPEWRIGHT_GITHUB_HOST")
                .unwrap_or_else(|| DEFAULT_GITHUB_HOST.to_string()),
            github_timeout_secs: env_parsed("PIPEWRIGHT_GITHUB_TIMEOUT")
                .unwrap_or(DEFAULT_GITHUB_TIMEOUT_SECS),
            fetch_concurrency: env_parsed("PIPEWRIGHT_FETCH_CONCURRENCY")
                .unwrap_or(DEFAULT_FETCH_CONCURRENCY),
            log_level: env::var("PIPEWRIGHT_LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
                .to_lowercase(),
        }
    }
}

impl PipewrightConfig {
    /// Loads from environment variables, failing on malformed values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or if
    /// the resulting configuration fails [`validate`](Self::validate).
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(raw) = env::var("PIPEWRIGHT_PROVIDER") {
            parse_provider(&raw)?;
        }
        strict_parse::<u16>("PIPEWRIGHT_PORT")?;
        strict_parse::<f32>("PIPEWRIGHT_TEMPERATURE")?;
        strict_parse::<u64>("PIPEWRIGHT_REQUEST_TIMEOUT")?;
        strict_parse::<u64>("PIPEWRIGHT_GITHUB_TIMEOUT")?;
        strict_parse::<usize>("PIPEWRIGHT_FETCH_CONCURRENCY")?;

        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    ///
    /// Provider-specific validation (API keys, endpoints) is handled by genai
    /// on the first request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Model name cannot be empty".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationFailed(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be between 1 second and 10 minutes".to_string(),
            ));
        }

        if self.github_timeout_secs == 0 || self.github_timeout_secs > 120 {
            return Err(ConfigError::ValidationFailed(
                "GitHub timeout must be between 1 and 120 seconds".to_string(),
            ));
        }

        if self.fetch_concurrency == 0 || self.fetch_concurrency > 64 {
            return Err(ConfigError::ValidationFailed(
                "Fetch concurrency must be between 1 and 64".to_string(),
            ));
        }

        if !self.github_api_base.starts_with("http://")
            && !self.github_api_base.starts_with("https://")
        {
            return Err(ConfigError::ValidationFailed(format!(
                "GitHub API base must be an http(s) URL: {}",
                self.github_api_base
            )));
        }

        if self.github_host.trim().is_empty() || self.github_host.contains('/') {
            return Err(ConfigError::ValidationFailed(format!(
                "GitHub host must be a bare host name: {}",
                self.github_host
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Socket address string for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Converts configuration to a display map, with the credential redacted
    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("host".to_string(), self.host.clone());
        map.insert("port".to_string(), self.port.to_string());
        map.insert("provider".to_string(), self.provider.as_str().to_string());
        map.insert("model".to_string(), self.model.clone());
        map.insert(
            "api_key".to_string(),
            redacted(self.api_key.as_deref()).to_string(),
        );
        if let Some(ref url) = self.api_base_url {
            map.insert("api_base_url".to_string(), url.clone());
        }
        map.insert("temperature".to_string(), self.temperature.to_string());
        map.insert(
            "request_timeout_secs".to_string(),
            self.request_timeout_secs.to_string(),
        );
        map.insert("github_api_base".to_string(), self.github_api_base.clone());
        map.insert("github_host".to_string(), self.github_host.clone());
        map.insert(
            "github_timeout_secs".to_string(),
            self.github_timeout_secs.to_string(),
        );
        map.insert(
            "fetch_concurrency".to_string(),
            self.fetch_concurrency.to_string(),
        );
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

impl fmt::Display for PipewrightConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipewright Configuration:")?;
        writeln!(f, "  Listen: {}", self.bind_address())?;
        writeln!(f, "  Provider: {}", self.provider.as_str())?;
        writeln!(f, "  Model: {}", self.model)?;
        writeln!(f, "  API Key: {}", redacted(self.api_key.as_deref()))?;
        if let Some(ref url) = self.api_base_url {
            writeln!(f, "  API Base URL: {}", url)?;
        }
        writeln!(f, "  Temperature: {}", self.temperature)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  GitHub API: {}", self.github_api_base)?;
        writeln!(f, "  GitHub Host: {}", self.github_host)?;
        writeln!(f, "  GitHub Timeout: {}s", self.github_timeout_secs)?;
        writeln!(f, "  Fetch Concurrency: {}", self.fetch_concurrency)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

impl fmt::Debug for PipewrightConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipewrightConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &redacted(self.api_key.as_deref()))
            .field("api_base_url", &self.api_base_url)
            .field("temperature", &self.temperature)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("github_api_base", &self.github_api_base)
            .field("github_host", &self.github_host)
            .field("github_timeout_secs", &self.github_timeout_secs)
            .field("fetch_concurrency", &self.fetch_concurrency)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Parses a provider name into a genai adapter kind
pub fn parse_provider(s: &str) -> Result<AdapterKind, ConfigError> {
    AdapterKind::from_lower_str(&s.trim().to_lowercase())
        .ok_or_else(|| ConfigError::InvalidProvider(s.to_string()))
}

fn redacted(secret: Option<&str>) -> &'static str {
    match secret {
        Some(_) => "<redacted>",
        None => "<from provider env>",
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|v| v.parse::<T>().ok())
}

fn strict_parse<T>(key: &str) -> Result<(), ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match env_string(key) {
        Some(raw) => raw.parse::<T>().map(|_| ()).map_err(|e| ConfigError::ParseError {
            field: key.to_string(),
            error: e.to_string(),
        }),
        None => Ok(()),
    }
}
