//! File selection and snapshot assembly
//!
//! Decides which repository paths matter for CI synthesis, condenses
//! lockfiles and stitches the fetched files into a single snapshot text.

pub mod condense;
pub mod relevance;
pub mod snapshot;

pub use condense::{condense, is_lockfile, DEFAULT_MAX_LINES, LOCKFILE_SUFFIXES};
pub use relevance::{is_relevant, Ecosystem, Match, RelevanceFilter};
pub use snapshot::{assemble, FileEntry, NO_FILES_PLACEHOLDER};
