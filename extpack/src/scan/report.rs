//! Output formatting for scan reports.
//!
//! The human format is line-oriented and stable so CI logs can be grepped;
//! the JSON format carries the same information for tooling.

use super::scanner::{FileReport, ScanFinding, ScanOutcome, ScanReport};
use serde::Serialize;

/// Final line printed when every target passed.
pub const PASS_SUMMARY: &str = "All checks passed successfully.";
/// Final line printed when any target failed.
pub const FAIL_SUMMARY: &str = "Leak scan failed.";

/// Format a report for terminal output.
///
/// # Examples
///
/// ```
/// use extpack::scan::{FileReport, ScanOutcome, ScanReport, format_human};
///
/// let report = ScanReport {
///     files: vec![FileReport {
///         target: "package.json".to_owned(),
///         resolved: None,
///         outcome: ScanOutcome::Clean,
///     }],
/// };
/// let output = format_human(&report);
/// assert!(output.starts_with("Scanning package.json...\nPASS: package.json is clean.\n"));
/// assert!(output.ends_with("All checks passed successfully.\n"));
/// ```
#[must_use]
pub fn format_human(report: &ScanReport) -> String {
    let mut output = String::new();
    for file in &report.files {
        write_file_section(&mut output, file);
    }
    let summary = if report.passed() {
        PASS_SUMMARY
    } else {
        FAIL_SUMMARY
    };
    output.push('\n');
    push_line(&mut output, summary);
    output
}

fn push_line(output: &mut String, line: &str) {
    output.push_str(line);
    output.push('\n');
}

fn write_file_section(output: &mut String, file: &FileReport) {
    let target = &file.target;
    match &file.outcome {
        ScanOutcome::Missing => {
            push_line(output, &format!("ERROR: Target file {target} not found!"));
        }
        ScanOutcome::Unreadable { reason } => {
            push_line(output, &format!("Scanning {target}..."));
            push_line(output, &format!("ERROR: Could not read {target}: {reason}"));
        }
        ScanOutcome::Clean => {
            push_line(output, &format!("Scanning {target}..."));
            push_line(output, &format!("PASS: {target} is clean."));
        }
        ScanOutcome::Findings(findings) => {
            push_line(output, &format!("Scanning {target}..."));
            push_line(
                output,
                &format!("FAIL: {target} has potential hardcoded paths:"),
            );
            for finding in findings {
                push_line(
                    output,
                    &format!(
                        "  - Line {}: {} found: {}",
                        finding.line_number, finding.pattern, finding.text
                    ),
                );
            }
        }
    }
}

/// Format a report as pretty-printed JSON.
///
/// # Examples
///
/// ```
/// use extpack::scan::{ScanReport, format_json};
///
/// let json = format_json(&ScanReport::default());
/// assert!(json.contains("\"passed\": true"));
/// ```
#[must_use]
pub fn format_json(report: &ScanReport) -> String {
    let json_data = ScanReportJson::from_report(report);
    serde_json::to_string_pretty(&json_data).unwrap_or_else(|_| "{}".to_owned())
}

/// JSON-serializable view of a [`ScanReport`].
#[derive(Debug, Serialize)]
pub struct ScanReportJson<'a> {
    /// Aggregate verdict.
    pub passed: bool,
    /// Per-target entries in request order.
    pub files: Vec<FileReportJson<'a>>,
}

/// JSON-serializable view of one target.
#[derive(Debug, Serialize)]
pub struct FileReportJson<'a> {
    /// Target identifier as requested.
    pub target: &'a str,
    /// `clean`, `findings`, `missing` or `unreadable`.
    pub status: &'static str,
    /// Read failure description; present only when `status` is `unreadable`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
    /// Findings for this target; empty unless `status` is `findings`.
    pub findings: &'a [ScanFinding],
}

impl<'a> ScanReportJson<'a> {
    /// Build the JSON view of `report`.
    #[must_use]
    pub fn from_report(report: &'a ScanReport) -> Self {
        Self {
            passed: report.passed(),
            files: report
                .files
                .iter()
                .map(|file| FileReportJson {
                    target: &file.target,
                    status: status_label(&file.outcome),
                    reason: match &file.outcome {
                        ScanOutcome::Unreadable { reason } => Some(reason.as_str()),
                        _ => None,
                    },
                    findings: file.outcome.findings(),
                })
                .collect(),
        }
    }
}

const fn status_label(outcome: &ScanOutcome) -> &'static str {
    match outcome {
        ScanOutcome::Clean => "clean",
        ScanOutcome::Findings(_) => "findings",
        ScanOutcome::Missing => "missing",
        ScanOutcome::Unreadable { .. } => "unreadable",
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests fail fast when the rendered JSON does not parse"
)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn finding(line_number: usize, pattern: &str, text: &str) -> ScanFinding {
        ScanFinding {
            file: "vite.config.js".to_owned(),
            line_number,
            pattern: pattern.to_owned(),
            text: text.to_owned(),
        }
    }

    #[fixture]
    fn mixed_report() -> ScanReport {
        ScanReport {
            files: vec![
                FileReport {
                    target: "package.json".to_owned(),
                    resolved: None,
                    outcome: ScanOutcome::Clean,
                },
                FileReport {
                    target: "vite.config.js".to_owned(),
                    resolved: None,
                    outcome: ScanOutcome::Findings(vec![
                        finding(3, "Linux Home Path", "  root: '/home/dev/app',"),
                    ]),
                },
                FileReport {
                    target: "scripts/postbuild.js".to_owned(),
                    resolved: None,
                    outcome: ScanOutcome::Missing,
                },
            ],
        }
    }

    #[rstest]
    fn human_format_lists_every_file(mixed_report: ScanReport) {
        let expected = concat!(
            "Scanning package.json...\n",
            "PASS: package.json is clean.\n",
            "Scanning vite.config.js...\n",
            "FAIL: vite.config.js has potential hardcoded paths:\n",
            "  - Line 3: Linux Home Path found:   root: '/home/dev/app',\n",
            "ERROR: Target file scripts/postbuild.js not found!\n",
            "\n",
            "Leak scan failed.\n",
        );
        assert_eq!(format_human(&mixed_report), expected);
    }

    #[rstest]
    fn json_format_carries_status_and_findings(mixed_report: ScanReport) {
        let value: serde_json::Value =
            serde_json::from_str(&format_json(&mixed_report)).expect("valid JSON");
        let at = |pointer: &str| value.pointer(pointer).cloned();

        assert_eq!(at("/passed"), Some(json!(false)));
        assert_eq!(at("/files/0/status"), Some(json!("clean")));
        assert_eq!(at("/files/1/status"), Some(json!("findings")));
        assert_eq!(at("/files/1/findings/0/line_number"), Some(json!(3)));
        assert_eq!(
            at("/files/1/findings/0/pattern"),
            Some(json!("Linux Home Path"))
        );
        assert_eq!(at("/files/2/status"), Some(json!("missing")));
        assert_eq!(at("/files/2/findings"), Some(json!([])));
        assert_eq!(at("/files/2/reason"), None);
    }

    #[rstest]
    fn unreadable_target_keeps_every_other_file_line(mut mixed_report: ScanReport) {
        mixed_report.files.insert(
            1,
            FileReport {
                target: "locked.js".to_owned(),
                resolved: None,
                outcome: ScanOutcome::Unreadable {
                    reason: "Permission denied (os error 13)".to_owned(),
                },
            },
        );

        let output = format_human(&mixed_report);
        let lines: Vec<&str> = output.lines().collect();
        for expected in [
            "PASS: package.json is clean.",
            "Scanning locked.js...",
            "ERROR: Could not read locked.js: Permission denied (os error 13)",
            "FAIL: vite.config.js has potential hardcoded paths:",
            "  - Line 3: Linux Home Path found:   root: '/home/dev/app',",
            "ERROR: Target file scripts/postbuild.js not found!",
        ] {
            assert!(lines.contains(&expected), "missing {expected:?} in:\n{output}");
        }
        assert_eq!(lines.last(), Some(&FAIL_SUMMARY));
    }

    #[test]
    fn unreadable_target_alone_fails_the_run() {
        let report = ScanReport {
            files: vec![FileReport {
                target: "locked.js".to_owned(),
                resolved: None,
                outcome: ScanOutcome::Unreadable {
                    reason: "Input/output error (os error 5)".to_owned(),
                },
            }],
        };

        assert!(format_human(&report).ends_with("\nLeak scan failed.\n"));
        let value: serde_json::Value =
            serde_json::from_str(&format_json(&report)).expect("valid JSON");
        assert_eq!(value.pointer("/passed"), Some(&json!(false)));
        assert_eq!(
            value.pointer("/files/0/status"),
            Some(&json!("unreadable"))
        );
        assert_eq!(
            value.pointer("/files/0/reason"),
            Some(&json!("Input/output error (os error 5)"))
        );
    }

    #[test]
    fn empty_report_passes() {
        assert_eq!(
            format_human(&ScanReport::default()),
            "\nAll checks passed successfully.\n"
        );
    }
}
