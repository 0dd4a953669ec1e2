//! Use-case level errors for collection, analysis and generation

use super::request::RequestError;
use super::response::ParseError;
use crate::llm::BackendError;
use crate::repo::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Request body failed validation
    #[error("{0}")]
    Validation(#[from] RequestError),

    /// Repository tree could not be listed
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// Model endpoint failed or timed out
    #[error("LLM request failed: {0}")]
    Backend(#[from] BackendError),

    /// Model reply did not carry the expected JSON
    #[error("Failed to parse LLM response: {0}")]
    Parse(#[from] ParseError),

    /// Model replied with nothing
    #[error("LLM returned an empty response")]
    EmptyResponse,
}
