//! Orchestration behind the `extpack` binaries.
//!
//! A [`Session`] pairs the resolved project root with its configuration.
//! Every operation takes the root from the session rather than from the
//! process environment, so tests can point a session at a temporary tree.

use crate::archive::{ArchiveBuilder, ArchiveSummary};
use crate::cli::{AddonCli, CommonArgs, ScanCli, SourceCli};
use crate::config::Config;
use crate::error::Result;
use crate::naming::ArchiveName;
use crate::project::{ProjectRoot, resolve_version};
use crate::scan::{LeakScanner, PatternSet, ScanReport};
use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use std::path::PathBuf;

/// Resolved root and configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Session {
    root: ProjectRoot,
    config: Config,
}

impl Session {
    /// Create a session from already-resolved parts.
    #[must_use]
    pub const fn new(root: ProjectRoot, config: Config) -> Self {
        Self { root, config }
    }

    /// Resolve the project root and load its configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when no project root can be found or the
    /// configuration is invalid.
    pub fn open(common: &CommonArgs) -> Result<Self> {
        let root = match &common.project_root {
            Some(dir) => ProjectRoot::from_explicit(dir.as_std_path())?,
            None => ProjectRoot::discover()?,
        };
        let config = Config::load(&root, common.config.as_deref())?;
        Ok(Self::new(root, config))
    }

    /// The project root.
    #[must_use]
    pub const fn root(&self) -> &ProjectRoot {
        &self.root
    }

    /// The loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Build the extension archive from the configured source directory.
    ///
    /// A missing source directory is not an error; the archive is written
    /// with no entries. `explicit` overrides the default output path.
    ///
    /// # Errors
    ///
    /// Returns a version error when the default name cannot be formed, or a
    /// packaging error when the build fails.
    pub fn package_addon(&self, explicit: Option<&Utf8Path>) -> Result<ArchiveSummary> {
        let addon = &self.config.addon;
        let source_dir = self.root.join(&addon.source_dir);
        let output = self.archive_path(&addon.name, explicit)?;
        info!("packaging {source_dir} into {output}");

        let filter = self.config.exclusion.filter();
        let builder = ArchiveBuilder::new(&filter, self.config.archive.compression);
        Ok(builder.build_subtree(source_dir.as_std_path(), output.as_std_path())?)
    }

    /// Build the source archive from the configured files and directories.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid selection paths, a version
    /// error when the default name cannot be formed, or a packaging error
    /// when the build fails.
    pub fn package_source(&self, explicit: Option<&Utf8Path>) -> Result<ArchiveSummary> {
        let source = &self.config.source;
        let selection = source.selection()?;
        let output = self.archive_path(&source.name, explicit)?;
        info!("packaging sources of {} into {output}", self.root.as_path());

        let filter = self.config.exclusion.filter();
        let builder = ArchiveBuilder::new(&filter, self.config.archive.compression);
        Ok(builder.build_selection(
            self.root.as_path().as_std_path(),
            &selection,
            output.as_std_path(),
        )?)
    }

    /// Scan `targets`, or the configured targets when none are given.
    ///
    /// Targets are resolved against the project root, then against
    /// `fallback` when one is supplied. Unreadable and missing targets are
    /// recorded in the report.
    ///
    /// # Errors
    ///
    /// Returns a scan error when a pattern fails to compile.
    pub fn scan(&self, targets: &[String], fallback: Option<PathBuf>) -> Result<ScanReport> {
        let settings = &self.config.scan;
        let patterns = PatternSet::new(&settings.usernames)?;
        let mut scanner = LeakScanner::new(
            patterns,
            &settings.comment_prefixes,
            self.root.as_path().as_std_path(),
        );
        if let Some(base) = fallback {
            scanner = scanner.with_fallback(base);
        }
        let requested = if targets.is_empty() {
            settings.targets.as_slice()
        } else {
            targets
        };
        Ok(scanner.scan(requested))
    }

    /// Path for an archive of `component`: `explicit` when given, otherwise
    /// the versioned name inside the output directory.
    ///
    /// # Errors
    ///
    /// Returns a version error when no explicit path is given and the
    /// version cannot be resolved.
    pub fn archive_path(
        &self,
        component: &str,
        explicit: Option<&Utf8Path>,
    ) -> Result<Utf8PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        let version = resolve_version(self.config.version.as_deref(), &self.root)?;
        let name = ArchiveName::new(component, version);
        Ok(self.config.output_dir(&self.root).join(name.filename()))
    }
}

/// Run the `extpack-addon` command.
///
/// # Errors
///
/// Propagates any failure from [`Session::open`] or
/// [`Session::package_addon`].
pub fn package_addon(cli: &AddonCli) -> Result<ArchiveSummary> {
    Session::open(&cli.common)?.package_addon(cli.output.as_deref())
}

/// Run the `extpack-source` command.
///
/// # Errors
///
/// Propagates any failure from [`Session::open`] or
/// [`Session::package_source`].
pub fn package_source(cli: &SourceCli) -> Result<ArchiveSummary> {
    Session::open(&cli.common)?.package_source(cli.output.as_deref())
}

/// Run the `extpack-scan` command, falling back to the current directory
/// for targets missing from the project root.
///
/// # Errors
///
/// Propagates any failure from [`Session::open`] or [`Session::scan`].
pub fn scan(cli: &ScanCli) -> Result<ScanReport> {
    let session = Session::open(&cli.common)?;
    session.scan(&cli.targets, std::env::current_dir().ok())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
