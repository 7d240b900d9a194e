//! Top-level error type for the packaging and scanning binaries.
//!
//! Subsystem errors ([`PackagingError`], [`ScanError`]) convert into
//! [`ExtpackError`] so the binaries can propagate everything with `?` and
//! print a single `error: <message>` line.

use crate::archive::PackagingError;
use crate::scan::ScanError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can abort an `extpack` run.
#[derive(Debug, Error)]
pub enum ExtpackError {
    /// No ancestor of the search start contains a project marker file.
    #[error("project root not found: no extpack.toml or package.json above {start}")]
    ProjectRootNotFound {
        /// Directory the upward search started from.
        start: Utf8PathBuf,
    },

    /// A path handed to the tool is not valid UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the path.
        path: String,
    },

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration in {path}: {reason}")]
    Config {
        /// Configuration file that failed to load.
        path: Utf8PathBuf,
        /// Description of the read or parse failure.
        reason: String,
    },

    /// Neither the configuration nor `package.json` provides a version.
    #[error("no version configured and {manifest} has no \"version\" field")]
    MissingVersion {
        /// The `package.json` that was consulted.
        manifest: Utf8PathBuf,
    },

    /// A version string is not valid semver.
    #[error("invalid version {value:?}: {reason}")]
    InvalidVersion {
        /// The rejected version text.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// Archive packaging failed.
    #[error(transparent)]
    Packaging(#[from] PackagingError),

    /// The leak scan could not run to completion.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// An I/O operation outside packaging or scanning failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results carrying [`ExtpackError`].
pub type Result<T> = std::result::Result<T, ExtpackError>;
