//! Line-by-line scanning of target files.

use super::patterns::PatternSet;
use log::{debug, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Line prefixes treated as comments when the configuration names none.
pub const DEFAULT_COMMENT_PREFIXES: &[&str] = &["#", "//"];

/// One pattern occurrence on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanFinding {
    /// Target identifier as it was requested.
    pub file: String,
    /// 1-based line number.
    pub line_number: usize,
    /// Name of the matching pattern.
    pub pattern: String,
    /// The line as written, without its terminator.
    pub text: String,
}

/// Result of scanning one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The file was read and nothing matched.
    Clean,
    /// The file was read and at least one line matched.
    Findings(Vec<ScanFinding>),
    /// The file exists under neither the project root nor the fallback base.
    Missing,
    /// The file exists but reading it failed.
    Unreadable {
        /// Description of the read failure.
        reason: String,
    },
}

impl ScanOutcome {
    /// Return true for [`ScanOutcome::Clean`].
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    /// Findings carried by this outcome; empty unless it is
    /// [`ScanOutcome::Findings`].
    #[must_use]
    pub fn findings(&self) -> &[ScanFinding] {
        match self {
            Self::Findings(findings) => findings,
            Self::Clean | Self::Missing | Self::Unreadable { .. } => &[],
        }
    }
}

/// Outcome for one requested target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Target identifier as it was requested.
    pub target: String,
    /// Where the target was found, if anywhere.
    pub resolved: Option<PathBuf>,
    /// What the scan found.
    pub outcome: ScanOutcome,
}

/// Aggregate result of a scan, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Per-target results.
    pub files: Vec<FileReport>,
}

impl ScanReport {
    /// True when every target was found, read and clean.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.files.iter().all(|file| file.outcome.is_clean())
    }

    /// Every finding across all targets.
    pub fn findings(&self) -> impl Iterator<Item = &ScanFinding> {
        self.files.iter().flat_map(|file| file.outcome.findings())
    }

    /// Targets that could not be found.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .filter(|file| file.outcome == ScanOutcome::Missing)
            .map(|file| file.target.as_str())
    }

    /// Targets that exist but could not be read.
    pub fn unreadable(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .filter(|file| matches!(file.outcome, ScanOutcome::Unreadable { .. }))
            .map(|file| file.target.as_str())
    }
}

/// Scans files for leak patterns.
///
/// Targets are resolved against the base directory (normally the project
/// root) and then against an optional fallback base (normally the current
/// directory).
#[derive(Debug, Clone)]
pub struct LeakScanner {
    patterns: PatternSet,
    comment_prefixes: Vec<String>,
    base: PathBuf,
    fallback: Option<PathBuf>,
}

impl LeakScanner {
    /// Create a scanner resolving targets against `base`.
    ///
    /// Blank comment prefixes are ignored.
    #[must_use]
    pub fn new(
        patterns: PatternSet,
        comment_prefixes: &[String],
        base: impl Into<PathBuf>,
    ) -> Self {
        Self {
            patterns,
            comment_prefixes: comment_prefixes
                .iter()
                .filter(|prefix| !prefix.trim().is_empty())
                .cloned()
                .collect(),
            base: base.into(),
            fallback: None,
        }
    }

    /// Also look for targets beneath `fallback` when the base lacks them.
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<PathBuf>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Scan every target and collect the results.
    ///
    /// Missing and unreadable targets are recorded and scanning continues.
    #[must_use]
    pub fn scan<S: AsRef<str>>(&self, targets: &[S]) -> ScanReport {
        let files = targets
            .iter()
            .map(|target| self.scan_file(target.as_ref()))
            .collect();
        ScanReport { files }
    }

    /// Scan a single target.
    #[must_use]
    pub fn scan_file(&self, target: &str) -> FileReport {
        let Some(path) = self.resolve(target) else {
            warn!("scan target {target} not found");
            return FileReport {
                target: target.to_owned(),
                resolved: None,
                outcome: ScanOutcome::Missing,
            };
        };

        let outcome = match fs::read(&path) {
            Ok(bytes) => self.classify(target, &String::from_utf8_lossy(&bytes)),
            Err(err) => {
                warn!("failed to read scan target {}: {err}", path.display());
                ScanOutcome::Unreadable {
                    reason: err.to_string(),
                }
            }
        };
        FileReport {
            target: target.to_owned(),
            resolved: Some(path),
            outcome,
        }
    }

    fn classify(&self, target: &str, text: &str) -> ScanOutcome {
        let findings = self.scan_text(target, text);
        if findings.is_empty() {
            ScanOutcome::Clean
        } else {
            warn!("{target}: {} potential hardcoded path(s)", findings.len());
            ScanOutcome::Findings(findings)
        }
    }

    /// Scan already-loaded text, attributing findings to `file`.
    #[must_use]
    pub fn scan_text(&self, file: &str, text: &str) -> Vec<ScanFinding> {
        let mut findings = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if self.is_comment(line) {
                continue;
            }
            findings.extend(self.patterns.matching(line).map(|pattern| ScanFinding {
                file: file.to_owned(),
                line_number: index + 1,
                pattern: pattern.name().to_owned(),
                text: line.to_owned(),
            }));
        }
        findings
    }

    /// Locate `target` beneath the base, then beneath the fallback.
    #[must_use]
    pub fn resolve(&self, target: &str) -> Option<PathBuf> {
        let primary = self.base.join(target);
        if primary.is_file() {
            return Some(primary);
        }
        let alternate = self.fallback.as_deref().map(|base| base.join(target))?;
        if alternate.is_file() {
            debug!("resolved {target} via fallback at {}", alternate.display());
            Some(alternate)
        } else {
            None
        }
    }

    /// Base directory targets are resolved against first.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn is_comment(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        self.comment_prefixes
            .iter()
            .any(|prefix| trimmed.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
