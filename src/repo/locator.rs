//! Repository coordinates and access credentials

use regex::Regex;
use std::fmt;
use thiserror::Error;

/// Web host repository URLs point at unless configured otherwise
pub const DEFAULT_HOST: &str = "github.com";

/// Why a repository URL was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocatorError {
    #[error("URL must be a valid {host} HTTPS URL.")]
    WrongHost { host: String },

    #[error("Invalid {host} repository URL format.")]
    Malformed { host: String },
}

/// Owner, repository name and ref that identify what to inspect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocator {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl RepoLocator {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    /// Parses `https://<host>/<owner>/<repo>[.git]`
    ///
    /// Surrounding whitespace is ignored. Owner and repository segments are
    /// limited to ASCII letters, digits, `_`, `.` and `-`.
    pub fn parse(url: &str, host: &str, branch: &str) -> Result<Self, LocatorError> {
        let url = url.trim();
        let prefix = format!("https://{}/", host);

        if !url.starts_with(&prefix) {
            return Err(LocatorError::WrongHost {
                host: host.to_string(),
            });
        }

        let pattern = format!(
            r"^https://{}/([a-zA-Z0-9_.-]+)/([a-zA-Z0-9_.-]+?)(?:\.git)?$",
            regex::escape(host)
        );
        let re = Regex::new(&pattern).map_err(|_| LocatorError::Malformed {
            host: host.to_string(),
        })?;

        let captures = re.captures(url).ok_or_else(|| LocatorError::Malformed {
            host: host.to_string(),
        })?;

        Ok(Self::new(&captures[1], &captures[2], branch))
    }

    /// `owner/repo`
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.branch)
    }
}

/// Access token for the repository host
///
/// Never printed: both `Debug` and `Display` render a placeholder.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_url() {
        let locator = RepoLocator::parse("https://github.com/psf/requests", "github.com", "main")
            .unwrap();
        assert_eq!(locator, RepoLocator::new("psf", "requests", "main"));
        assert_eq!(locator.slug(), "psf/requests");
        assert_eq!(locator.to_string(), "psf/requests@main");
    }

    #[test]
    fn test_parse_strips_git_suffix_and_whitespace() {
        let locator = RepoLocator::parse(
            "  https://github.com/rust-lang/rust.git \n",
            "github.com",
            "master",
        )
        .unwrap();
        assert_eq!(locator.owner, "rust-lang");
        assert_eq!(locator.repo, "rust");
    }

    #[test]
    fn test_parse_keeps_dots_in_repo_name() {
        let locator =
            RepoLocator::parse("https://github.com/vercel/next.js", "github.com", "canary")
                .unwrap();
        assert_eq!(locator.repo, "next.js");
    }

    #[test]
    fn test_parse_rejects_other_hosts() {
        let err = RepoLocator::parse("https://gitlab.com/a/b", "github.com", "main").unwrap_err();
        assert!(matches!(err, LocatorError::WrongHost { .. }));

        let err = RepoLocator::parse("http://github.com/a/b", "github.com", "main").unwrap_err();
        assert!(matches!(err, LocatorError::WrongHost { .. }));
    }

    #[test]
    fn test_parse_rejects_extra_segments() {
        for url in [
            "https://github.com/psf",
            "https://github.com/psf/requests/tree/main",
            "https://github.com/psf/requests/",
            "https://github.com/psf/req uests",
        ] {
            let err = RepoLocator::parse(url, "github.com", "main").unwrap_err();
            assert!(matches!(err, LocatorError::Malformed { .. }), "{url}");
        }
    }

    #[test]
    fn test_parse_custom_host() {
        let locator =
            RepoLocator::parse("https://git.example.org/team/app", "git.example.org", "dev")
                .unwrap();
        assert_eq!(locator.slug(), "team/app");
    }

    #[test]
    fn test_credential_is_redacted() {
        let credential = Credential::new("ghp_supersecret");
        assert_eq!(format!("{:?}", credential), "Credential(<redacted>)");
        assert_eq!(credential.to_string(), "<redacted>");
        assert_eq!(credential.expose(), "ghp_supersecret");
        assert_eq!(credential.len(), 15);
    }
}
