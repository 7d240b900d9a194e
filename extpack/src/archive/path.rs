//! Archive-internal path normalization.
//!
//! Every entry written to an archive is named by an [`ArchivePath`]: a
//! relative, forward-slash path that is identical no matter which host built
//! the archive. Paths read from configuration accept `\` as a separator on
//! every platform. Paths read from disk use the host's own separators, and a
//! name that contains a literal `\` on a host where it is not a separator is
//! rejected rather than reinterpreted.

use super::error::PackagingError;
use std::fmt;
use std::path::{Component, Path};

/// A relative, forward-slash path naming one archive entry.
///
/// Never empty, never absolute, and never contains `..`, `\` or empty
/// segments.
///
/// # Examples
///
/// ```
/// use extpack::archive::ArchivePath;
/// use std::path::Path;
///
/// let path = ArchivePath::from_relative(Path::new("src/app.ts")).expect("relative path");
/// assert_eq!(path.as_str(), "src/app.ts");
///
/// let parsed = ArchivePath::parse(r"assets\icons\logo.png").expect("relative path");
/// assert_eq!(parsed.as_str(), "assets/icons/logo.png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArchivePath(String);

impl ArchivePath {
    /// Normalize a host-native relative path.
    ///
    /// `.` components are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`PackagingError::InvalidEntryPath`] for absolute paths,
    /// drive prefixes, `..` components, non-UTF-8 names, names containing a
    /// literal backslash, or paths that normalize to nothing.
    pub fn from_relative(path: &Path) -> Result<Self, PackagingError> {
        let shown = path.display().to_string();
        let mut segments = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(segment) => {
                    let text = segment.to_str().ok_or_else(|| invalid(&shown))?;
                    if text.contains('\\') {
                        return Err(invalid(&shown));
                    }
                    segments.push(text);
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid(&shown));
                }
            }
        }
        Self::from_segments(&segments, &shown)
    }

    /// Parse a path written in configuration, using `/` or `\` separators.
    ///
    /// # Errors
    ///
    /// Returns [`PackagingError::InvalidEntryPath`] when the text is
    /// absolute, starts with a drive letter, contains `..` or is empty.
    pub fn parse(text: &str) -> Result<Self, PackagingError> {
        if text.starts_with(['/', '\\']) || has_drive_prefix(text) {
            return Err(invalid(text));
        }
        let mut segments = Vec::new();
        push_segments(&mut segments, text, text)?;
        Self::from_segments(&segments, text)
    }

    /// Return the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return true when `self` equals `ancestor` or lies beneath it.
    ///
    /// The comparison is segment-aware: `src-old/a.ts` is not inside `src`.
    #[must_use]
    pub fn is_within(&self, ancestor: &Self) -> bool {
        self.0 == ancestor.0
            || self
                .0
                .strip_prefix(ancestor.0.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }

    fn from_segments(segments: &[&str], shown: &str) -> Result<Self, PackagingError> {
        if segments.is_empty() {
            return Err(invalid(shown));
        }
        Ok(Self(segments.join("/")))
    }
}

impl fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArchivePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

fn push_segments<'a>(
    segments: &mut Vec<&'a str>,
    text: &'a str,
    shown: &str,
) -> Result<(), PackagingError> {
    for piece in text.split(['/', '\\']) {
        match piece {
            "" | "." => {}
            ".." => return Err(invalid(shown)),
            _ => segments.push(piece),
        }
    }
    Ok(())
}

fn has_drive_prefix(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic()
    )
}

fn invalid(shown: &str) -> PackagingError {
    PackagingError::InvalidEntryPath {
        path: shown.to_owned(),
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "valid inputs are asserted to parse")]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    #[rstest]
    #[case::plain("manifest.json", "manifest.json")]
    #[case::nested("src/components/Clock.tsx", "src/components/Clock.tsx")]
    #[case::current_dir("./src/./main.tsx", "src/main.tsx")]
    #[case::trailing_slash("src/", "src")]
    fn from_relative_normalizes(#[case] input: &str, #[case] expected: &str) {
        let path = ArchivePath::from_relative(&PathBuf::from(input)).expect("valid path");
        assert_eq!(path.as_str(), expected);
        assert!(!path.as_str().contains('\\'));
        assert!(!path.as_str().starts_with('/'));
    }

    #[rstest]
    #[case::absolute("/etc/passwd")]
    #[case::parent("../escape.txt")]
    #[case::nested_parent("src/../../escape.txt")]
    #[case::empty("")]
    #[case::only_dot(".")]
    fn from_relative_rejects(#[case] input: &str) {
        let result = ArchivePath::from_relative(&PathBuf::from(input));
        assert!(
            matches!(result, Err(PackagingError::InvalidEntryPath { .. })),
            "expected InvalidEntryPath for {input:?}"
        );
    }

    #[rstest]
    #[case::forward("src/app.ts", "src/app.ts")]
    #[case::mixed(r"extension\assets/index.js", "extension/assets/index.js")]
    #[case::doubled("src//app.ts", "src/app.ts")]
    fn parse_normalizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(ArchivePath::parse(input).expect("valid").as_str(), expected);
    }

    #[rstest]
    #[case::leading_slash("/src")]
    #[case::leading_backslash(r"\src")]
    #[case::drive(r"C:\Users\dev\project")]
    #[case::drive_forward("d:/work")]
    #[case::parent("src/../..")]
    #[case::empty("")]
    fn parse_rejects(#[case] input: &str) {
        assert!(
            matches!(
                ArchivePath::parse(input),
                Err(PackagingError::InvalidEntryPath { .. })
            ),
            "expected rejection for {input:?}"
        );
    }

    #[rstest]
    #[case::same("src", "src", true)]
    #[case::child("src/app.ts", "src", true)]
    #[case::sibling_prefix("src-old/app.ts", "src", false)]
    #[case::unrelated("extension/app.ts", "src", false)]
    fn is_within_is_segment_aware(
        #[case] child: &str,
        #[case] parent: &str,
        #[case] expected: bool,
    ) {
        let path = ArchivePath::parse(child).expect("valid");
        let ancestor = ArchivePath::parse(parent).expect("valid");
        assert_eq!(path.is_within(&ancestor), expected);
    }

    #[cfg(windows)]
    #[test]
    fn host_backslashes_are_separators() {
        let path = ArchivePath::from_relative(Path::new(r"assets\icons\logo.png"))
            .expect("valid path");
        assert_eq!(path.as_str(), "assets/icons/logo.png");
    }

    #[cfg(unix)]
    #[rstest]
    #[case::file_name(r"a\b.txt")]
    #[case::directory_name(r"assets\icons/logo.png")]
    fn literal_backslash_in_name_is_rejected(#[case] input: &str) {
        let result = ArchivePath::from_relative(Path::new(input));
        assert!(
            matches!(result, Err(PackagingError::InvalidEntryPath { ref path }) if path == input),
            "expected InvalidEntryPath for {input:?}, got {result:?}"
        );
    }

    #[cfg(unix)]
    #[test]
    fn backslash_name_cannot_collide_with_nested_path() {
        let nested = ArchivePath::from_relative(Path::new("a/b.txt")).expect("valid path");
        assert_eq!(nested.as_str(), "a/b.txt");
        assert!(ArchivePath::from_relative(Path::new(r"a\b.txt")).is_err());
    }

    #[test]
    fn display_matches_as_str() {
        let path = ArchivePath::parse("extension/newtab.html").expect("valid");
        assert_eq!(path.to_string(), path.as_str());
    }
}
