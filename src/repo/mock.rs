use super::error::FetchError;
use super::locator::{Credential, RepoLocator};
use super::source::{RepositorySource, TreeEntry};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-memory repository used by tests and local demos
///
/// Every listed blob is readable unless it was registered with
/// [`MockRepositorySource::with_unreadable`].
pub struct MockRepositorySource {
    files: BTreeMap<String, Option<String>>,
    tree_error: Option<FetchError>,
    content_requests: Mutex<Vec<String>>,
}

impl MockRepositorySource {
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            tree_error: None,
            content_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), Some(content.into()));
        self
    }

    /// Listed in the tree, but every content fetch fails
    pub fn with_unreadable(mut self, path: impl Into<String>) -> Self {
        self.files.insert(path.into(), None);
        self
    }

    pub fn with_tree_error(mut self, error: FetchError) -> Self {
        self.tree_error = Some(error);
        self
    }

    /// Paths whose content was requested, in request order
    pub fn content_requests(&self) -> Vec<String> {
        self.content_requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Default for MockRepositorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepositorySource for MockRepositorySource {
    async fn fetch_tree(
        &self,
        _locator: &RepoLocator,
        _credential: &Credential,
    ) -> Result<Vec<TreeEntry>, FetchError> {
        if let Some(ref error) = self.tree_error {
            return Err(error.clone());
        }
        Ok(self.files.keys().map(TreeEntry::blob).collect())
    }

    async fn fetch_file_content(
        &self,
        _locator: &RepoLocator,
        path: &str,
        _credential: &Credential,
    ) -> Option<String> {
        self.content_requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path.to_string());
        self.files.get(path).cloned().flatten()
    }

    fn name(&self) -> &str {
        "MockRepository"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_source_lists_and_reads() {
        let source = MockRepositorySource::new()
            .with_file("README.md", "# demo")
            .with_unreadable("package.json");
        let locator = RepoLocator::new("o", "r", "main");
        let credential = Credential::new("t");

        let tree = source.fetch_tree(&locator, &credential).await.unwrap();
        assert_eq!(tree.len(), 2);

        assert_eq!(
            source
                .fetch_file_content(&locator, "README.md", &credential)
                .await
                .as_deref(),
            Some("# demo")
        );
        assert!(source
            .fetch_file_content(&locator, "package.json", &credential)
            .await
            .is_none());
        assert_eq!(source.content_requests(), vec!["README.md", "package.json"]);
    }

    #[tokio::test]
    async fn test_mock_source_tree_error() {
        let source = MockRepositorySource::new().with_tree_error(FetchError::Unauthorized);
        let result = source
            .fetch_tree(&RepoLocator::new("o", "r", "main"), &Credential::new("t"))
            .await;
        assert_eq!(result.unwrap_err(), FetchError::Unauthorized);
    }
}
