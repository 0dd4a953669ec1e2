//! pipewright - AI-assisted CI pipeline synthesis
//!
//! pipewright reads the CI/CD and dependency files of a remote GitHub
//! repository, condenses them into a snapshot and asks an LLM for a
//! tech-stack analysis plus candidate pipeline steps. From the steps a user
//! approves it generates a GitHub Actions workflow with setup instructions.
//!
//! # Project Structure
//!
//! - [`repo`]: repository host access (tree listing, file contents)
//! - [`selection`]: relevance filter, lockfile condenser, snapshot assembly
//! - [`llm`]: chat client abstraction over `genai`, plus a scripted mock
//! - [`analysis`]: prompts, output parsing and the [`AnalysisService`]
//! - [`server`]: the axum HTTP surface
//! - [`cli`]: the `pipewright` binary's commands
//!
//! # Example
//!
//! ```no_run
//! use pipewright::{AnalysisRequest, AnalysisService, GenAIClient, GitHubClient, PipewrightConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipewrightConfig::from_env()?;
//! let service = AnalysisService::from_config(
//!     &config,
//!     Arc::new(GitHubClient::from_config(&config)?),
//!     Arc::new(GenAIClient::from_config(&config)?),
//! );
//!
//! let request = AnalysisRequest::new("https://github.com/psf/requests", "ghp_...");
//! let report = service.analyze(request).await?;
//! for step in &report.ci_pipeline_steps {
//!     println!("[{}] {}: {}", step.category, step.name, step.default_command);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod llm;
pub mod repo;
pub mod selection;
pub mod server;
pub mod util;

pub use analysis::{
    AnalysisReport, AnalysisRequest, AnalysisService, GeneratedPipeline, ParseError,
    PipelineStep, ProjectAnalysis, ServiceError, StepCategory, TechItem,
};
pub use config::{ConfigError, PipewrightConfig};
pub use llm::{BackendError, GenAIClient, LLMClient, MockLLMClient};
pub use repo::{FetchError, GitHubClient, RepositorySource};
pub use selection::{is_relevant, RelevanceFilter};
pub use server::{create_router, AppState};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
