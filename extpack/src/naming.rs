//! Versioned archive naming policy.
//!
//! Archives are named `<component>-v<version>.zip`, for example
//! `terminal-start-v1.0.0.zip`. The version is a parsed [`semver::Version`]
//! so a malformed string can never reach a file name.

use semver::Version;
use std::fmt;

/// File-name suffix shared by every archive.
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// File name of one packaged archive.
///
/// # Examples
///
/// ```
/// use extpack::naming::ArchiveName;
/// use semver::Version;
///
/// let name = ArchiveName::new("terminal-start", Version::new(1, 0, 0));
/// assert_eq!(name.filename(), "terminal-start-v1.0.0.zip");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveName {
    component: String,
    version: Version,
}

impl ArchiveName {
    /// Create a name from a component label and a version.
    #[must_use]
    pub fn new(component: impl Into<String>, version: Version) -> Self {
        Self {
            component: component.into(),
            version,
        }
    }

    /// The component label, such as `terminal-start-source`.
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    /// The version embedded in the name.
    #[must_use]
    pub const fn version(&self) -> &Version {
        &self.version
    }

    /// Render the full file name.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArchiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-v{}{ARCHIVE_EXTENSION}",
            self.component, self.version
        )
    }
}
