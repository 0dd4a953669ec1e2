//! Path relevance rules for CI/CD and dependency files
//!
//! A path is relevant when it is one of the well-known CI/container files,
//! a GitHub Actions workflow, or a manifest/lockfile of a known ecosystem.
//! All comparisons are made on the lower-cased path.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::OnceLock;

/// CI and container files matched by exact (lower-cased) path
pub const COMMON_FILES: &[&str] = &[
    "dockerfile",
    ".docker/dockerfile",
    "docker-compose.yml",
    "jenkinsfile",
    ".gitlab-ci.yml",
    "azure-pipelines.yml",
    ".circleci/config.yml",
    "readme.md",
];

pub const WORKFLOW_DIR: &str = ".github/workflows/";

pub const WORKFLOW_SUFFIXES: &[&str] = &[".yml", ".yaml"];

pub const NODE_FILES: &[&str] = &[
    "package.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "package-lock.json",
];

pub const PYTHON_FILES: &[&str] = &[
    "requirements.txt",
    "pipfile",
    "pipfile.lock",
    "pyproject.toml",
    "poetry.lock",
];

pub const JAVA_FILES: &[&str] = &[
    "pom.xml",
    "build.gradle",
    "settings.gradle",
    "gradlew",
    "gradlew.bat",
];

/// Directory names holding third-party code; nothing below them is relevant
pub const VENDORED_DIRS: &[&str] = &[
    "node_modules",
    "bower_components",
    "vendor",
    ".venv",
    "venv",
    "site-packages",
];

/// Ecosystem tag for a group of manifest and lockfile names
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ecosystem {
    Node,
    Python,
    Java,
    Other(String),
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ecosystem::Node => f.write_str("node"),
            Ecosystem::Python => f.write_str("python"),
            Ecosystem::Java => f.write_str("java"),
            Ecosystem::Other(name) => f.write_str(name),
        }
    }
}

/// Why a path was selected
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Match {
    Common,
    Workflow,
    Manifest(Ecosystem),
}

/// Classifies repository paths as relevant or not
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    common: BTreeSet<String>,
    ecosystems: BTreeMap<Ecosystem, BTreeSet<String>>,
    vendored_dirs: BTreeSet<String>,
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::empty()
            .with_common(COMMON_FILES.iter().copied())
            .with_ecosystem(Ecosystem::Node, NODE_FILES.iter().copied())
            .with_ecosystem(Ecosystem::Python, PYTHON_FILES.iter().copied())
            .with_ecosystem(Ecosystem::Java, JAVA_FILES.iter().copied())
            .with_vendored_dirs(VENDORED_DIRS.iter().copied())
    }
}

impl RelevanceFilter {
    /// A filter that only recognises workflow files
    pub fn empty() -> Self {
        Self {
            common: BTreeSet::new(),
            ecosystems: BTreeMap::new(),
            vendored_dirs: BTreeSet::new(),
        }
    }

    pub fn with_common<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.common
            .extend(names.into_iter().map(|n| n.as_ref().to_lowercase()));
        self
    }

    /// Adds file names to an ecosystem, creating it if needed
    pub fn with_ecosystem<I, S>(mut self, ecosystem: Ecosystem, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ecosystems
            .entry(ecosystem)
            .or_default()
            .extend(names.into_iter().map(|n| n.as_ref().to_lowercase()));
        self
    }

    pub fn with_vendored_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.vendored_dirs
            .extend(dirs.into_iter().map(|d| d.as_ref().to_lowercase()));
        self
    }

    pub fn ecosystems(&self) -> impl Iterator<Item = &Ecosystem> {
        self.ecosystems.keys()
    }

    /// Every category the path falls into; empty when irrelevant
    pub fn matches(&self, path: &str) -> Vec<Match> {
        let lower = path.to_lowercase();
        let mut found = Vec::new();

        if self.is_vendored(&lower) {
            return found;
        }

        if self.common.contains(&lower) {
            found.push(Match::Common);
        }

        if lower.starts_with(WORKFLOW_DIR)
            && WORKFLOW_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
        {
            found.push(Match::Workflow);
        }

        for (ecosystem, names) in &self.ecosystems {
            let hit = names.iter().any(|name| {
                lower == *name
                    || (lower.ends_with(name.as_str())
                        && lower[..lower.len() - name.len()].ends_with('/'))
            });
            if hit {
                found.push(Match::Manifest(ecosystem.clone()));
            }
        }

        found
    }

    pub fn is_relevant(&self, path: &str) -> bool {
        !self.matches(path).is_empty()
    }

    /// Relevant paths from `paths`, deduplicated and in path order
    pub fn select<I, S>(&self, paths: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .filter(|p| self.is_relevant(p.as_ref()))
            .map(|p| p.as_ref().to_string())
            .collect()
    }

    fn is_vendored(&self, lower: &str) -> bool {
        let mut segments: Vec<&str> = lower.split('/').collect();
        // last segment is the file name
        segments.pop();
        segments
            .iter()
            .any(|segment| self.vendored_dirs.contains(*segment))
    }
}

/// Checks a path against the default tables
pub fn is_relevant(path: &str) -> bool {
    static DEFAULT: OnceLock<RelevanceFilter> = OnceLock::new();
    DEFAULT.get_or_init(RelevanceFilter::default).is_relevant(path)
}
