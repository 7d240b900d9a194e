//! Inclusion policy shared by both packaging modes.
//!
//! The policy is data, not control flow: directory names and file suffixes
//! live in lists that the collector consults. New file types are included by
//! default under [`InclusionPolicy::DenyList`]; projects that would rather
//! name what ships can switch to [`InclusionPolicy::AllowList`].

use serde::Deserialize;

/// Directory names pruned from every walk.
///
/// Version-control metadata, language-runtime caches, IDE state and
/// dependency installs.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] =
    &[".git", "__pycache__", ".idea", ".vscode", "node_modules"];

/// File-name suffixes never packaged: archives and OS metadata files.
pub const DEFAULT_EXCLUDED_SUFFIXES: &[&str] = &[".zip", ".DS_Store"];

/// How files that match no exclusion are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InclusionPolicy {
    /// Everything not explicitly excluded is packaged.
    #[default]
    DenyList,
    /// Only files ending in an allowed suffix are packaged.
    AllowList,
}

/// Decides whether a directory or file is eligible for packaging.
///
/// # Examples
///
/// ```
/// use extpack::archive::ExclusionFilter;
///
/// let filter = ExclusionFilter::default();
/// assert!(!filter.allows_dir(".git"));
/// assert!(filter.allows_dir("src"));
/// assert!(!filter.allows_file("terminal-start-v1.0.0.zip"));
/// assert!(filter.allows_file("manifest.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionFilter {
    excluded_dirs: Vec<String>,
    excluded_suffixes: Vec<String>,
    policy: InclusionPolicy,
    allowed_suffixes: Vec<String>,
}

impl ExclusionFilter {
    /// Create a deny-list filter from explicit directory names and suffixes.
    #[must_use]
    pub const fn new(excluded_dirs: Vec<String>, excluded_suffixes: Vec<String>) -> Self {
        Self {
            excluded_dirs,
            excluded_suffixes,
            policy: InclusionPolicy::DenyList,
            allowed_suffixes: Vec::new(),
        }
    }

    /// Switch to the allow-list policy with the given suffixes.
    ///
    /// Exclusions still apply; a file must both avoid every excluded suffix
    /// and end in one of `allowed_suffixes`.
    #[must_use]
    pub fn with_allow_list(mut self, allowed_suffixes: Vec<String>) -> Self {
        self.policy = InclusionPolicy::AllowList;
        self.allowed_suffixes = allowed_suffixes;
        self
    }

    /// Return the active inclusion policy.
    #[must_use]
    pub const fn policy(&self) -> InclusionPolicy {
        self.policy
    }

    /// Return true when the walk may descend into a directory named `name`.
    #[must_use]
    pub fn allows_dir(&self, name: &str) -> bool {
        !self.excluded_dirs.iter().any(|excluded| excluded == name)
    }

    /// Return true when a file named `name` may be packaged.
    #[must_use]
    pub fn allows_file(&self, name: &str) -> bool {
        if self
            .excluded_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
        {
            return false;
        }
        match self.policy {
            InclusionPolicy::DenyList => true,
            InclusionPolicy::AllowList => self
                .allowed_suffixes
                .iter()
                .any(|suffix| name.ends_with(suffix.as_str())),
        }
    }
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self::new(
            to_owned_list(DEFAULT_EXCLUDED_DIRS),
            to_owned_list(DEFAULT_EXCLUDED_SUFFIXES),
        )
    }
}

/// Copy a static name list into owned strings.
#[must_use]
pub fn to_owned_list(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}
