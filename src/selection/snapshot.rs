//! Snapshot assembly: concatenates fetched files into one prompt-ready text

use super::condense::{condense, is_lockfile};

/// Text used when no relevant file could be read
pub const NO_FILES_PLACEHOLDER: &str =
    "No relevant CI/CD or dependency files were found in this repository.";

/// A fetched file ready for inclusion in a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub content: String,
    pub is_lockfile: bool,
}

impl FileEntry {
    /// Builds an entry, condensing lockfile content to `max_lines`
    pub fn new(path: impl Into<String>, content: &str, max_lines: usize) -> Self {
        let path = path.into();
        let is_lockfile = is_lockfile(&path);
        let content = condense(&path, content, max_lines).into_owned();
        Self {
            path,
            content,
            is_lockfile,
        }
    }

    fn header(&self) -> String {
        format!("File: {}", self.path)
    }
}

/// Joins entries as `header\ncontent` blocks separated by a blank line
pub fn assemble(entries: &[FileEntry]) -> String {
    if entries.is_empty() {
        return NO_FILES_PLACEHOLDER.to_string();
    }

    entries
        .iter()
        .map(|entry| format!("{}\n{}", entry.header(), entry.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_uses_placeholder() {
        assert_eq!(assemble(&[]), NO_FILES_PLACEHOLDER);
    }

    #[test]
    fn test_headers_and_separators() {
        let entries = vec![
            FileEntry::new("Dockerfile", "FROM python:3.12", 300),
            FileEntry::new("poetry.lock", "name = \"requests\"\nversion = \"2.31.0\"", 300),
        ];

        let snapshot = assemble(&entries);
        assert_eq!(
            snapshot,
            "File: Dockerfile\nFROM python:3.12\n\nFile: poetry.lock\nversion = \"2.31.0\""
        );
    }

    #[test]
    fn test_entry_condenses_lockfiles_only() {
        let manifest = FileEntry::new("package.json", "{\"name\": \"x\"}", 1);
        assert!(!manifest.is_lockfile);
        assert_eq!(manifest.content, "{\"name\": \"x\"}");

        let lock = FileEntry::new("yarn.lock", "a\nversion 1\nb\nversion 2", 1);
        assert!(lock.is_lockfile);
        assert_eq!(lock.content, "version 1");
    }

    #[test]
    fn test_blank_content_still_included() {
        let entries = vec![FileEntry::new("requirements.txt", "", 300)];
        assert_eq!(assemble(&entries), "File: requirements.txt\n");
    }
}
