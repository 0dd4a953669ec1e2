use thiserror::Error;

/// Fatal failures while listing a repository tree
///
/// Per-file content failures never produce one of these; the fetcher skips
/// the file instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Invalid or insufficient GitHub token")]
    Unauthorized,

    #[error("Repository or branch not found")]
    NotFound,

    #[error("GitHub API returned an error")]
    Upstream { status: u16 },

    #[error("Failed to reach GitHub API")]
    Transport(String),
}

impl FetchError {
    /// Status code the repository host answered with, if it answered at all
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            FetchError::Unauthorized => Some(401),
            FetchError::NotFound => Some(404),
            FetchError::Upstream { status } => Some(*status),
            FetchError::Transport(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_do_not_leak_details() {
        assert_eq!(
            FetchError::Unauthorized.to_string(),
            "Invalid or insufficient GitHub token"
        );
        assert_eq!(
            FetchError::Transport("dns error: api.github.com".to_string()).to_string(),
            "Failed to reach GitHub API"
        );
    }

    #[test]
    fn test_upstream_status() {
        assert_eq!(FetchError::NotFound.upstream_status(), Some(404));
        assert_eq!(
            FetchError::Upstream { status: 503 }.upstream_status(),
            Some(503)
        );
        assert_eq!(FetchError::Transport(String::new()).upstream_status(), None);
    }
}
