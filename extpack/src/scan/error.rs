//! Error types for the leak scanner.

use thiserror::Error;

/// Errors that stop a scan before every target has been checked.
///
/// Missing and unreadable targets are not errors; they are recorded in the
/// report.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A leak pattern failed to compile.
    #[error("invalid leak pattern {name}: {source}")]
    Pattern {
        /// Name of the pattern being compiled.
        name: String,
        /// Compiler diagnostic.
        #[source]
        source: regex::Error,
    },
}
