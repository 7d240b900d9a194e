//! Project root discovery and version resolution.
//!
//! The project root is the nearest directory, searching upward, that holds
//! either `extpack.toml` or `package.json`. Discovery starts beside the
//! running binary and falls back to the current directory, so the tools work
//! both when built inside the project and when invoked from it. Environment
//! variables and absolute paths baked into the binary are never consulted.

use crate::config::CONFIG_FILE_NAME;
use crate::error::{ExtpackError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use semver::Version;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// npm manifest consulted for the project version.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Files whose presence marks a directory as the project root, in priority
/// order.
pub const ROOT_MARKERS: &[&str] = &[CONFIG_FILE_NAME, PACKAGE_MANIFEST];

/// Directory that every relative project path is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot(Utf8PathBuf);

impl ProjectRoot {
    /// Use `path` as the project root without searching.
    ///
    /// # Errors
    ///
    /// Returns [`ExtpackError::ProjectRootNotFound`] when `path` is not a
    /// directory, or [`ExtpackError::NonUtf8Path`] when it is not UTF-8.
    pub fn from_explicit(path: &Path) -> Result<Self> {
        let dir = utf8(path.to_path_buf())?;
        if !dir.is_dir() {
            return Err(ExtpackError::ProjectRootNotFound { start: dir });
        }
        Ok(Self(dir))
    }

    /// Search `start` and its ancestors for a root marker.
    ///
    /// # Errors
    ///
    /// Returns [`ExtpackError::ProjectRootNotFound`] when no ancestor
    /// qualifies.
    pub fn discover_from(start: &Utf8Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| is_project_root(dir))
            .map(|dir| {
                debug!("project root resolved to {dir}");
                Self(dir.to_path_buf())
            })
            .ok_or_else(|| ExtpackError::ProjectRootNotFound {
                start: start.to_path_buf(),
            })
    }

    /// Discover the root from the running binary's directory, then from the
    /// current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ExtpackError::ProjectRootNotFound`] when neither search
    /// succeeds, or an I/O error when the current directory is unavailable.
    pub fn discover() -> Result<Self> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .and_then(|dir| Utf8PathBuf::try_from(dir).ok());
        if let Some(found) = exe_dir.and_then(|dir| Self::discover_from(&dir).ok()) {
            return Ok(found);
        }
        let cwd = utf8(std::env::current_dir()?)?;
        Self::discover_from(&cwd)
    }

    /// Return the root directory.
    #[must_use]
    pub fn as_path(&self) -> &Utf8Path {
        &self.0
    }

    /// Resolve a project-relative path.
    #[must_use]
    pub fn join(&self, relative: impl AsRef<Utf8Path>) -> Utf8PathBuf {
        self.0.join(relative)
    }
}

impl AsRef<Path> for ProjectRoot {
    fn as_ref(&self) -> &Path {
        self.0.as_std_path()
    }
}

/// Return true when `dir` holds one of the [`ROOT_MARKERS`].
#[must_use]
pub fn is_project_root(dir: &Utf8Path) -> bool {
    ROOT_MARKERS.iter().any(|marker| dir.join(marker).is_file())
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    version: Option<String>,
}

/// Determine the version embedded in archive names.
///
/// A `configured` version wins; otherwise the `"version"` field of the
/// project's `package.json` is used.
///
/// # Errors
///
/// Returns [`ExtpackError::InvalidVersion`] for text that is not semver,
/// [`ExtpackError::Config`] when `package.json` is not valid JSON, and
/// [`ExtpackError::MissingVersion`] when no version is available.
pub fn resolve_version(configured: Option<&str>, root: &ProjectRoot) -> Result<Version> {
    if let Some(text) = configured {
        return parse_version(text);
    }

    let manifest_path = root.join(PACKAGE_MANIFEST);
    let contents = match std::fs::read_to_string(&manifest_path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(ExtpackError::MissingVersion {
                manifest: manifest_path,
            });
        }
        Err(err) => return Err(err.into()),
    };
    let manifest: PackageManifest =
        serde_json::from_str(&contents).map_err(|err| ExtpackError::Config {
            path: manifest_path.clone(),
            reason: err.to_string(),
        })?;
    manifest.version.map_or_else(
        || {
            Err(ExtpackError::MissingVersion {
                manifest: manifest_path,
            })
        },
        |text| parse_version(&text),
    )
}

fn parse_version(text: &str) -> Result<Version> {
    Version::parse(text.trim()).map_err(|err| ExtpackError::InvalidVersion {
        value: text.to_owned(),
        reason: err.to_string(),
    })
}

fn utf8(path: PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path).map_err(|err| ExtpackError::NonUtf8Path {
        path: err.as_path().display().to_string(),
    })
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test fixtures fail fast when the temporary tree cannot be prepared"
)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("temp dir creation succeeds")
    }

    fn utf8_path(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp dir is UTF-8")
    }

    #[rstest]
    #[case::package_json(PACKAGE_MANIFEST)]
    #[case::config(CONFIG_FILE_NAME)]
    fn discover_from_finds_marker_in_ancestor(temp_dir: TempDir, #[case] marker: &str) {
        let root = utf8_path(&temp_dir);
        fs::write(root.join(marker), "{}").expect("write marker");
        let nested = root.join("target").join("debug");
        fs::create_dir_all(&nested).expect("mkdir");

        let found = ProjectRoot::discover_from(&nested).expect("root found");
        assert_eq!(found.as_path(), root);
    }

    #[rstest]
    fn discover_from_prefers_nearest_marker(temp_dir: TempDir) {
        let outer = utf8_path(&temp_dir);
        fs::write(outer.join(PACKAGE_MANIFEST), "{}").expect("write");
        let inner = outer.join("packages").join("extension");
        fs::create_dir_all(&inner).expect("mkdir");
        fs::write(inner.join(CONFIG_FILE_NAME), "").expect("write");

        let found = ProjectRoot::discover_from(&inner.join("src")).expect("root found");
        assert_eq!(found.as_path(), inner);
    }

    #[rstest]
    fn discover_from_ignores_marker_directories(temp_dir: TempDir) {
        let root = utf8_path(&temp_dir);
        let start = root.join("a");
        fs::create_dir_all(start.join(PACKAGE_MANIFEST)).expect("mkdir");
        assert!(!is_project_root(&start));
    }

    #[rstest]
    fn from_explicit_rejects_missing_directory(temp_dir: TempDir) {
        let missing = temp_dir.path().join("nope");
        assert!(matches!(
            ProjectRoot::from_explicit(&missing),
            Err(ExtpackError::ProjectRootNotFound { .. })
        ));
    }

    #[rstest]
    fn join_resolves_relative_paths(temp_dir: TempDir) {
        let root = ProjectRoot::from_explicit(temp_dir.path()).expect("explicit root");
        assert_eq!(
            root.join("extension"),
            utf8_path(&temp_dir).join("extension")
        );
    }

    #[rstest]
    fn configured_version_wins(temp_dir: TempDir) {
        fs::write(
            temp_dir.path().join(PACKAGE_MANIFEST),
            r#"{"version": "0.0.1"}"#,
        )
        .expect("write");
        let root = ProjectRoot::from_explicit(temp_dir.path()).expect("root");
        let version = resolve_version(Some("1.0.0"), &root).expect("version");
        assert_eq!(version, Version::new(1, 0, 0));
    }

    #[rstest]
    fn version_falls_back_to_package_json(temp_dir: TempDir) {
        fs::write(
            temp_dir.path().join(PACKAGE_MANIFEST),
            r#"{"name": "terminal-start", "version": "1.2.3", "private": true}"#,
        )
        .expect("write");
        let root = ProjectRoot::from_explicit(temp_dir.path()).expect("root");
        let version = resolve_version(None, &root).expect("version");
        assert_eq!(version, Version::new(1, 2, 3));
    }

    #[rstest]
    #[case::no_manifest(None)]
    #[case::no_field(Some(r#"{"name": "terminal-start"}"#))]
    fn missing_version_is_reported(temp_dir: TempDir, #[case] manifest: Option<&str>) {
        if let Some(contents) = manifest {
            fs::write(temp_dir.path().join(PACKAGE_MANIFEST), contents).expect("write");
        }
        let root = ProjectRoot::from_explicit(temp_dir.path()).expect("root");
        assert!(matches!(
            resolve_version(None, &root),
            Err(ExtpackError::MissingVersion { .. })
        ));
    }

    #[rstest]
    fn malformed_version_is_rejected(temp_dir: TempDir) {
        let root = ProjectRoot::from_explicit(temp_dir.path()).expect("root");
        assert!(matches!(
            resolve_version(Some("v1"), &root),
            Err(ExtpackError::InvalidVersion { value, .. }) if value == "v1"
        ));
    }

    #[rstest]
    fn malformed_manifest_is_a_config_error(temp_dir: TempDir) {
        fs::write(temp_dir.path().join(PACKAGE_MANIFEST), "{ not json").expect("write");
        let root = ProjectRoot::from_explicit(temp_dir.path()).expect("root");
        assert!(matches!(
            resolve_version(None, &root),
            Err(ExtpackError::Config { .. })
        ));
    }
}
