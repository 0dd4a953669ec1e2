use super::error::FetchError;
use super::locator::{Credential, RepoLocator};
use async_trait::async_trait;

/// Kind of a tree entry as reported by the repository host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Blob,
    Tree,
    Commit,
}

/// One path from a recursive tree listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: String,
    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn blob(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Blob,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::Blob
    }
}

/// Read access to a remote repository
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Lists every entry of the tree at `locator.branch`
    async fn fetch_tree(
        &self,
        locator: &RepoLocator,
        credential: &Credential,
    ) -> Result<Vec<TreeEntry>, FetchError>;

    /// Returns the decoded text of one file, or `None` when it cannot be read
    async fn fetch_file_content(
        &self,
        locator: &RepoLocator,
        path: &str,
        credential: &Credential,
    ) -> Option<String>;

    fn name(&self) -> &str;
}
