//! Extension packaging library.
//!
//! This crate packages a browser-extension project into reproducible zip
//! archives and scans selected files for developer-machine paths before they
//! ship. It backs the `extpack-addon`, `extpack-source` and `extpack-scan`
//! binaries and can be driven programmatically from tests.
//!
//! # Modules
//!
//! - [`archive`] - Path normalization, exclusion policy, tree collection and
//!   zip writing
//! - [`cli`] - Command-line argument definitions shared by the binaries
//! - [`commands`] - Session orchestration behind each binary
//! - [`config`] - `extpack.toml` loading and defaults
//! - [`error`] - Top-level error type
//! - [`logging`] - Subscriber installation for the binaries
//! - [`naming`] - Versioned archive naming policy
//! - [`output`] - Line output and exit codes for the binaries
//! - [`project`] - Project root discovery and version resolution
//! - [`scan`] - Static leak scanner and report formatting

pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod naming;
pub mod output;
pub mod project;
pub mod scan;
