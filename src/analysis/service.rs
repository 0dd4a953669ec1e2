//! Analysis service orchestration
//!
//! `AnalysisService` wires the repository source, the relevance filter and
//! the two model stages together. It holds no per-request state, so one
//! instance is shared by every handler.
//!
//! ```text
//! collect:  validate -> tree -> select -> fetch (concurrent) -> condense
//! analyze:  collect -> snapshot -> model -> parse
//! generate: context -> model -> parse
//! ```

use super::analyzer::ProjectAnalyzer;
use super::error::ServiceError;
use super::generator::PipelineGenerator;
use super::request::{AnalysisRequest, RepositoryQuery};
use super::types::{AnalysisReport, GeneratedPipeline, PipelineStep, ProjectAnalysis};
use crate::config::PipewrightConfig;
use crate::llm::LLMClient;
use crate::repo::{RepositorySource, DEFAULT_HOST};
use crate::selection::{assemble, condense, FileEntry, RelevanceFilter};
use futures_util::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;

pub struct AnalysisService {
    source: Arc<dyn RepositorySource>,
    analyzer: ProjectAnalyzer,
    generator: PipelineGenerator,
    filter: RelevanceFilter,
    host: String,
    fetch_concurrency: usize,
}

impl AnalysisService {
    pub fn new(source: Arc<dyn RepositorySource>, llm: Arc<dyn LLMClient>) -> Self {
        Self {
            source,
            analyzer: ProjectAnalyzer::new(llm.clone()),
            generator: PipelineGenerator::new(llm),
            filter: RelevanceFilter::default(),
            host: DEFAULT_HOST.to_string(),
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
        }
    }

    /// Builds a service using host, temperature and fan-out from `config`
    pub fn from_config(
        config: &PipewrightConfig,
        source: Arc<dyn RepositorySource>,
        llm: Arc<dyn LLMClient>,
    ) -> Self {
        Self {
            source,
            analyzer: ProjectAnalyzer::new(llm.clone()).with_temperature(config.temperature),
            generator: PipelineGenerator::new(llm).with_temperature(config.temperature),
            filter: RelevanceFilter::default(),
            host: config.github_host.clone(),
            fetch_concurrency: config.fetch_concurrency.max(1),
        }
    }

    pub fn with_filter(mut self, filter: RelevanceFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_fetch_concurrency(mut self, fetch_concurrency: usize) -> Self {
        self.fetch_concurrency = fetch_concurrency.max(1);
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Relevant files of the repository, lockfiles condensed, keyed by path
    pub async fn collect(
        &self,
        request: AnalysisRequest,
    ) -> Result<BTreeMap<String, String>, ServiceError> {
        let query = request.validate(&self.host)?;
        let files = self.fetch_relevant(&query).await?;

        Ok(files
            .into_iter()
            .map(|(path, content)| {
                let condensed = condense(&path, &content, query.max_lines).into_owned();
                (path, condensed)
            })
            .collect())
    }

    /// Full analysis: fetch, snapshot, ask the model, parse its answer
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, ServiceError> {
        let start = Instant::now();
        let query = request.validate(&self.host)?;
        let files = self.fetch_relevant(&query).await?;

        let entries: Vec<FileEntry> = files
            .iter()
            .map(|(path, content)| FileEntry::new(path.as_str(), content, query.max_lines))
            .collect();
        let snapshot = assemble(&entries);

        let report = self
            .analyzer
            .analyze_report(&query.repo_url, &query.locator, &snapshot)
            .await?;

        info!(
            "Analyzed {} ({} files, {} steps) in {:?}",
            query.locator,
            entries.len(),
            report.ci_pipeline_steps.len(),
            start.elapsed()
        );

        Ok(report)
    }

    pub async fn generate_pipeline(
        &self,
        analysis: &ProjectAnalysis,
        steps: &[PipelineStep],
    ) -> Result<GeneratedPipeline, ServiceError> {
        self.generator.generate(analysis, steps).await
    }

    async fn fetch_relevant(
        &self,
        query: &RepositoryQuery,
    ) -> Result<BTreeMap<String, String>, ServiceError> {
        let tree = self
            .source
            .fetch_tree(&query.locator, &query.credential)
            .await?;

        let selected = self
            .filter
            .select(tree.iter().filter(|e| e.is_file()).map(|e| e.path.as_str()));

        debug!(
            "{} of {} tree entries selected in {}",
            selected.len(),
            tree.len(),
            query.locator
        );

        let fetched: Vec<(String, Option<String>)> = stream::iter(selected)
            .map(|path| async move {
                let content = self
                    .source
                    .fetch_file_content(&query.locator, &path, &query.credential)
                    .await;
                (path, content)
            })
            .buffer_unordered(self.fetch_concurrency)
            .collect()
            .await;

        let mut files = BTreeMap::new();
        let mut skipped = 0usize;
        for (path, content) in fetched {
            match content {
                Some(content) => {
                    files.insert(path, content);
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!("Skipped {} unreadable files in {}", skipped, query.locator);
        }

        Ok(files)
    }
}

impl std::fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisService")
            .field("source", &self.source.name())
            .field("analyzer", &self.analyzer)
            .field("host", &self.host)
            .field("fetch_concurrency", &self.fetch_concurrency)
            .finish()
    }
}
