//! Inbound `/analyze` request and its validation

use crate::repo::{Credential, LocatorError, RepoLocator};
use crate::selection::DEFAULT_MAX_LINES;
use serde::Deserialize;
use serde_json::Number;
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

pub const DEFAULT_BRANCH: &str = "main";
pub const BRANCH_LENGTH: RangeInclusive<usize> = 1..=100;
/// Classic and fine-grained access tokens are at least this long
pub const MIN_TOKEN_LENGTH: usize = 40;
pub const MAX_LINES_RANGE: RangeInclusive<usize> = 10..=1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error(transparent)]
    Url(#[from] LocatorError),

    #[error("branch must be between {min} and {max} characters")]
    BranchLength { min: usize, max: usize },

    #[error("github_pat must be at least {min} characters")]
    TokenTooShort { min: usize },

    #[error("max_lines must be an integer between {min} and {max}, got {value}")]
    MaxLinesOutOfRange { min: usize, max: usize, value: String },
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

fn default_max_lines() -> Number {
    Number::from(DEFAULT_MAX_LINES)
}

/// Body of `POST /analyze` and `POST /collect`
#[derive(Clone, Deserialize)]
pub struct AnalysisRequest {
    pub repo_url: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    pub github_pat: String,
    /// Any JSON number; the range check in `validate` rejects the rest
    #[serde(default = "default_max_lines")]
    pub max_lines: Number,
}

/// A validated request: where to look, with what, and how much to keep
#[derive(Debug, Clone)]
pub struct RepositoryQuery {
    pub repo_url: String,
    pub locator: RepoLocator,
    pub credential: Credential,
    pub max_lines: usize,
}

impl AnalysisRequest {
    pub fn new(repo_url: impl Into<String>, github_pat: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
            branch: default_branch(),
            github_pat: github_pat.into(),
            max_lines: default_max_lines(),
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Number::from(max_lines);
        self
    }

    /// Checks every field and produces the immutable query.
    ///
    /// `host` is the web host repository URLs must point at.
    pub fn validate(self, host: &str) -> Result<RepositoryQuery, RequestError> {
        if !BRANCH_LENGTH.contains(&self.branch.chars().count()) {
            return Err(RequestError::BranchLength {
                min: *BRANCH_LENGTH.start(),
                max: *BRANCH_LENGTH.end(),
            });
        }

        if self.github_pat.chars().count() < MIN_TOKEN_LENGTH {
            return Err(RequestError::TokenTooShort {
                min: MIN_TOKEN_LENGTH,
            });
        }

        let max_lines = self
            .max_lines
            .as_u64()
            .and_then(|v| usize::try_from(v).ok())
            .filter(|v| MAX_LINES_RANGE.contains(v))
            .ok_or_else(|| RequestError::MaxLinesOutOfRange {
                min: *MAX_LINES_RANGE.start(),
                max: *MAX_LINES_RANGE.end(),
                value: self.max_lines.to_string(),
            })?;

        let locator = RepoLocator::parse(&self.repo_url, host, &self.branch)?;

        Ok(RepositoryQuery {
            repo_url: self.repo_url.trim().to_string(),
            locator,
            credential: Credential::new(self.github_pat),
            max_lines,
        })
    }
}

impl fmt::Debug for AnalysisRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisRequest")
            .field("repo_url", &self.repo_url)
            .field("branch", &self.branch)
            .field("github_pat", &"[REDACTED]")
            .field("max_lines", &self.max_lines)
            .finish()
    }
}
