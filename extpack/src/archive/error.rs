//! Error types for archive packaging operations.
//!
//! Covers I/O and walk failures, zip encoding problems, and the validation
//! errors that keep archive paths relative and unique.

use std::path::PathBuf;
use thiserror::Error;

/// Errors arising from archive packaging operations.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// An I/O operation failed (reading source files, writing the archive).
    #[error("I/O error during packaging: {0}")]
    Io(#[from] std::io::Error),

    /// Walking a source tree failed part-way through.
    #[error("failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// The zip encoder rejected an entry or failed to finish the archive.
    #[error("zip encoding error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The finished archive could not be moved into place.
    #[error("failed to move archive into place at {path}: {source}")]
    Persist {
        /// Final output path of the archive.
        path: PathBuf,
        /// Underlying rename failure.
        #[source]
        source: std::io::Error,
    },

    /// A path cannot be represented as a relative archive path.
    #[error("invalid archive path: {path}")]
    InvalidEntryPath {
        /// The offending path, as displayed by the host.
        path: String,
    },

    /// Two entries resolved to the same archive path.
    #[error("duplicate archive entry: {path}")]
    DuplicateEntry {
        /// The archive path produced twice.
        path: String,
    },

    /// A selective build lists paths that would produce the same entries twice.
    #[error("selection entries overlap: {first} and {second}")]
    Overlap {
        /// The enclosing or first-listed path.
        first: String,
        /// The nested or repeated path.
        second: String,
    },
}
