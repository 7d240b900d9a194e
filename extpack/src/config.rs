//! `extpack.toml` loading and defaults.
//!
//! Every table is optional and every key falls back to a default, so a
//! project without a configuration file packages the stock
//! `terminal-start` layout. Unknown keys are rejected to catch typos.
//!
//! ```toml
//! version = "1.0.0"
//!
//! [addon]
//! name = "terminal-start"
//! source_dir = "extension"
//!
//! [exclusion]
//! suffixes = [".zip", ".DS_Store", ".map"]
//! ```

use crate::archive::exclusion::{
    DEFAULT_EXCLUDED_DIRS, DEFAULT_EXCLUDED_SUFFIXES, to_owned_list,
};
use crate::archive::{ArchivePath, Compression, ExclusionFilter, InclusionPolicy, Selection};
use crate::error::{ExtpackError, Result};
use crate::project::ProjectRoot;
use crate::scan::patterns::DEFAULT_USERNAMES;
use crate::scan::scanner::DEFAULT_COMMENT_PREFIXES;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;

/// Name of the configuration file looked up at the project root.
pub const CONFIG_FILE_NAME: &str = "extpack.toml";

/// Files included by name in the source archive.
pub const DEFAULT_SOURCE_FILES: &[&str] = &[
    "index.html",
    "package.json",
    "package-lock.json",
    "tsconfig.json",
    "vite.config.js",
    "tailwind.config.js",
    "postcss.config.js",
];

/// Subtrees included in the source archive.
pub const DEFAULT_SOURCE_DIRS: &[&str] = &["src", "extension", "scripts"];

/// Files checked by the leak scanner when none are named on the command line.
pub const DEFAULT_SCAN_TARGETS: &[&str] =
    &["package.json", "vite.config.js", "scripts/postbuild.js"];

/// Complete tool configuration.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Version embedded in archive names; `package.json` is used when unset.
    pub version: Option<String>,
    /// Directory receiving archives, relative to the project root.
    pub output_dir: Option<String>,
    /// Whole-subtree extension archive.
    pub addon: AddonConfig,
    /// Selective source archive.
    pub source: SourceConfig,
    /// Settings shared by both archives.
    pub archive: ArchiveConfig,
    /// Exclusion policy shared by both archives.
    pub exclusion: ExclusionConfig,
    /// Leak scanner settings.
    pub scan: ScanConfig,
}

impl Config {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed text or unknown keys.
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load configuration for `root`.
    ///
    /// An `explicit` path must exist. Otherwise `extpack.toml` at the root is
    /// read when present and defaults are used when it is not.
    ///
    /// # Errors
    ///
    /// Returns [`ExtpackError::Config`] when the file cannot be read or
    /// parsed.
    pub fn load(root: &ProjectRoot, explicit: Option<&Utf8Path>) -> Result<Self> {
        let path = match explicit {
            Some(given) => given.to_path_buf(),
            None => {
                let default_path = root.join(CONFIG_FILE_NAME);
                if !default_path.is_file() {
                    debug!("no {CONFIG_FILE_NAME} at {}; using defaults", root.as_path());
                    return Ok(Self::default());
                }
                default_path
            }
        };
        let text = std::fs::read_to_string(&path).map_err(|err| config_error(&path, &err))?;
        let config = Self::from_toml_str(&text).map_err(|err| config_error(&path, &err))?;
        debug!("loaded configuration from {path}");
        Ok(config)
    }

    /// Directory that receives archives.
    #[must_use]
    pub fn output_dir(&self, root: &ProjectRoot) -> Utf8PathBuf {
        self.output_dir
            .as_deref()
            .map_or_else(|| root.as_path().to_path_buf(), |dir| root.join(dir))
    }
}

fn config_error(path: &Utf8Path, err: &dyn std::fmt::Display) -> ExtpackError {
    ExtpackError::Config {
        path: path.to_path_buf(),
        reason: err.to_string().trim_end().to_owned(),
    }
}

/// Settings for the whole-subtree extension archive.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AddonConfig {
    /// Component label in the archive name.
    pub name: String,
    /// Directory archived in full, relative to the project root.
    pub source_dir: String,
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            name: "terminal-start".to_owned(),
            source_dir: "extension".to_owned(),
        }
    }
}

/// Settings for the selective source archive.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Component label in the archive name.
    pub name: String,
    /// Individual files, skipped when absent.
    pub files: Vec<String>,
    /// Subtrees archived minus exclusions, skipped when absent.
    pub dirs: Vec<String>,
}

impl SourceConfig {
    /// Validate the configured paths into a [`Selection`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::archive::PackagingError::InvalidEntryPath`] for
    /// absolute or escaping paths and
    /// [`crate::archive::PackagingError::Overlap`] for overlapping members.
    pub fn selection(&self) -> Result<Selection> {
        let files = parse_paths(&self.files)?;
        let dirs = parse_paths(&self.dirs)?;
        Ok(Selection::new(files, dirs)?)
    }
}

fn parse_paths(raw: &[String]) -> Result<Vec<ArchivePath>> {
    raw.iter()
        .map(|text| ArchivePath::parse(text).map_err(ExtpackError::from))
        .collect()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            name: "terminal-start-source".to_owned(),
            files: to_owned_list(DEFAULT_SOURCE_FILES),
            dirs: to_owned_list(DEFAULT_SOURCE_DIRS),
        }
    }
}

/// Archive encoding settings.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Compression applied to every entry.
    pub compression: Compression,
}

/// Exclusion lists and inclusion policy.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExclusionConfig {
    /// Whether unlisted files are included (`deny-list`) or must match an
    /// allowed suffix (`allow-list`).
    pub policy: InclusionPolicy,
    /// Directory names pruned from every walk.
    pub dirs: Vec<String>,
    /// File suffixes never packaged.
    pub suffixes: Vec<String>,
    /// Suffixes admitted under the allow-list policy.
    pub allowed_suffixes: Vec<String>,
}

impl ExclusionConfig {
    /// Build the filter shared by both packaging modes.
    #[must_use]
    pub fn filter(&self) -> ExclusionFilter {
        let filter = ExclusionFilter::new(self.dirs.clone(), self.suffixes.clone());
        match self.policy {
            InclusionPolicy::DenyList => filter,
            InclusionPolicy::AllowList => filter.with_allow_list(self.allowed_suffixes.clone()),
        }
    }
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            policy: InclusionPolicy::DenyList,
            dirs: to_owned_list(DEFAULT_EXCLUDED_DIRS),
            suffixes: to_owned_list(DEFAULT_EXCLUDED_SUFFIXES),
            allowed_suffixes: Vec::new(),
        }
    }
}

/// Leak scanner settings.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Files scanned when no targets are given on the command line.
    pub targets: Vec<String>,
    /// Developer usernames flagged wherever they appear.
    pub usernames: Vec<String>,
    /// Line prefixes marking comments that are not scanned.
    pub comment_prefixes: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            targets: to_owned_list(DEFAULT_SCAN_TARGETS),
            usernames: to_owned_list(DEFAULT_USERNAMES),
            comment_prefixes: to_owned_list(DEFAULT_COMMENT_PREFIXES),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
