//! Lockfile condensation
//!
//! Lockfiles are often tens of thousands of lines; only the lines naming
//! versions and resolution sources are useful to a model, so those are kept
//! up to a line budget.

use std::borrow::Cow;

/// Default cap on kept lines per lockfile
pub const DEFAULT_MAX_LINES: usize = 300;

/// Lower-cased path suffixes that mark a file as a lockfile
pub const LOCKFILE_SUFFIXES: &[&str] = &[
    ".lock",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "poetry.lock",
];

pub fn is_lockfile(path: &str) -> bool {
    let lower = path.to_lowercase();
    LOCKFILE_SUFFIXES
        .iter()
        .any(|suffix| lower.ends_with(suffix))
}

fn is_significant(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("version") || line.contains('@') || lower.contains("resolved")
}

/// Reduces a lockfile to at most `max_lines` significant lines.
///
/// Non-lockfile content is returned unchanged. When no line is significant
/// the first `max_lines` raw lines are kept instead.
pub fn condense<'a>(path: &str, content: &'a str, max_lines: usize) -> Cow<'a, str> {
    if !is_lockfile(path) {
        return Cow::Borrowed(content);
    }

    let kept: Vec<&str> = content
        .lines()
        .filter(|line| is_significant(line))
        .take(max_lines)
        .collect();

    if kept.is_empty() {
        return Cow::Owned(content.lines().take(max_lines).collect::<Vec<_>>().join("\n"));
    }

    Cow::Owned(kept.join("\n"))
}
