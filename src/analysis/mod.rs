//! Repository analysis and workflow generation
//!
//! The two model-backed stages, their prompts and output parsing, and the
//! [`AnalysisService`] that drives them from a validated request.

pub mod analyzer;
pub mod error;
pub mod generator;
pub mod prompt;
pub mod request;
pub mod response;
pub mod service;
pub mod types;

pub use analyzer::ProjectAnalyzer;
pub use error::ServiceError;
pub use generator::PipelineGenerator;
pub use request::{AnalysisRequest, RepositoryQuery, RequestError};
pub use response::{extract_json, parse_analysis, parse_pipeline, ParseError};
pub use service::AnalysisService;
pub use types::{
    AnalysisReport, GeneratedPipeline, PipelineStep, ProjectAnalysis, StepCategory, TechItem,
};
