//! Remote repository access
//!
//! [`RepositorySource`] is the seam between the analysis pipeline and the
//! hosting service. [`GitHubClient`] talks to the GitHub REST API;
//! [`MockRepositorySource`] serves files from memory.

mod error;
mod github;
mod locator;
mod mock;
mod source;

pub use error::FetchError;
pub use github::GitHubClient;
pub use locator::{Credential, LocatorError, RepoLocator, DEFAULT_HOST};
pub use mock::MockRepositorySource;
pub use source::{EntryKind, RepositorySource, TreeEntry};
