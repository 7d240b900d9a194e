//! CLI argument definitions for the `extpack` binaries.
//!
//! Each binary has its own top-level parser so `--help` describes exactly
//! what it does; the options every binary accepts live in [`CommonArgs`].

use camino::Utf8PathBuf;
use clap::{Args, Parser};
use tracing_subscriber::filter::LevelFilter;

use crate::logging;

/// Options shared by every binary.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonArgs {
    /// Project root [default: nearest ancestor holding extpack.toml or
    /// package.json].
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<Utf8PathBuf>,

    /// Configuration file [default: extpack.toml in the project root].
    #[arg(long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl CommonArgs {
    /// Log level selected by `-v` and `-q`.
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        logging::level_filter(self.verbosity, self.quiet)
    }
}

/// Package the extension directory into a versioned zip archive.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "extpack-addon")]
#[command(version)]
#[command(long_about = concat!(
    "Package the extension directory into a versioned zip archive.\n\n",
    "The whole directory is archived with paths relative to itself, minus ",
    "version-control metadata, IDE state, dependency installs, archives and ",
    "OS metadata files. Any previous archive at the output path is replaced.",
))]
pub struct AddonCli {
    /// Shared options.
    #[command(flatten)]
    pub common: CommonArgs,

    /// Archive path [default: ADDON_NAME-vVERSION.zip in the output directory].
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,
}

/// Package the project sources into a versioned zip archive.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "extpack-source")]
#[command(version)]
#[command(long_about = concat!(
    "Package the project sources into a versioned zip archive.\n\n",
    "Configured files and directories are archived with paths relative to ",
    "the project root. Missing entries are skipped; exclusions apply inside ",
    "directories. Any previous archive at the output path is replaced.",
))]
pub struct SourceCli {
    /// Shared options.
    #[command(flatten)]
    pub common: CommonArgs,

    /// Archive path [default: SOURCE_NAME-vVERSION.zip in the output directory].
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,
}

/// Scan files slated for distribution for hardcoded machine paths.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "extpack-scan")]
#[command(version)]
#[command(after_help = concat!(
    "PATTERNS:\n",
    "  Windows User Path       c:\\Users (any case)\n",
    "  Specific Username       configured usernames (any case)\n",
    "  Linux Home Path         /home/<name>\n",
    "  Absolute Windows Path   <drive>:\\...\n\n",
    "Lines starting with a comment marker (default '#' and '//') are not scanned.\n",
    "Exits with status 1 when any file has findings, is missing or cannot be read.",
))]
pub struct ScanCli {
    /// Shared options.
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Files to scan, relative to the project root [default: scan.targets].
    #[arg(value_name = "FILE")]
    pub targets: Vec<String>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
