//! # Error Types
//!
//! Errors raised by the file-list invariant checks. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// A recipe's file list violates a filename invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileListError {
    /// No filename was given and none could be derived from the URL path.
    #[error("filename not found: {url}")]
    MissingFilename {
        /// Name of the fragment that declared the URL.
        name: String,
        /// The URL whose path has no final segment.
        url: String,
    },

    /// Two or more files resolve to the same local filename.
    #[error("filenames not unique: {distinct} distinct among {total} files (first repeat: {filename})")]
    DuplicateFilename {
        /// The first filename seen twice, in traversal order.
        filename: String,
        /// Total number of file entries.
        total: usize,
        /// Number of distinct filenames.
        distinct: usize,
    },
}
