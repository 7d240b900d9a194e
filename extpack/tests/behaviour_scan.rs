//! Behaviour-driven tests for the path-leak scanner.
#![expect(
    clippy::expect_used,
    reason = "scenario setup fails fast when the temporary tree cannot be prepared"
)]

use extpack::commands::Session;
use extpack::config::Config;
use extpack::project::ProjectRoot;
use extpack::scan::{ScanReport, format_human};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::convert::Infallible;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tempfile::TempDir;

#[derive(Default)]
struct ScanWorld {
    temp_dir: Option<TempDir>,
    report: Option<ScanReport>,
    output: String,
}

#[fixture]
fn world() -> ScanWorld {
    ScanWorld {
        temp_dir: Some(TempDir::new().expect("temp dir")),
        ..ScanWorld::default()
    }
}

impl ScanWorld {
    fn root(&self) -> &Path {
        self.temp_dir.as_ref().expect("temp_dir set").path()
    }

    fn report(&self) -> &ScanReport {
        self.report.as_ref().expect("scan ran")
    }

    fn has_line(&self, predicate: impl Fn(&str) -> bool) -> bool {
        self.output.lines().any(predicate)
    }
}

/// Text quoted in a step.
#[derive(Debug)]
struct Quoted(String);

impl FromStr for Quoted {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(Self(input.to_owned()))
    }
}

impl Quoted {
    fn into_inner(self) -> String {
        self.0
    }
}

/// Comma-separated scan targets.
#[derive(Debug)]
struct TargetList(Vec<String>);

impl FromStr for TargetList {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(Self(input.split(',').map(str::to_owned).collect()))
    }
}

impl TargetList {
    fn into_inner(self) -> Vec<String> {
        self.0
    }
}

#[given("a project file \"{name}\" with the line '{line}'")]
fn given_project_file(world: &mut ScanWorld, name: Quoted, line: Quoted) {
    let path = world.root().join(name.into_inner());
    fs::write(path, format!("{}\n", line.into_inner())).expect("write");
}

#[when("the files \"{list}\" are scanned")]
fn when_scanned(world: &mut ScanWorld, list: TargetList) {
    let root = ProjectRoot::from_explicit(world.root()).expect("explicit root");
    let session = Session::new(root, Config::default());
    let targets = list.into_inner();
    let report = session.scan(&targets, None).expect("scan completes");
    world.output = format_human(&report);
    world.report = Some(report);
}

#[then("the scan fails")]
fn then_fails(world: &mut ScanWorld) {
    assert!(!world.report().passed(), "output:\n{}", world.output);
}

#[then("the scan passes")]
fn then_passes(world: &mut ScanWorld) {
    assert!(world.report().passed(), "output:\n{}", world.output);
}

#[then("\"{file}\" is reported with \"{pattern}\" on line {line}")]
fn then_reported(world: &mut ScanWorld, file: Quoted, pattern: Quoted, line: usize) {
    let expected = (file.into_inner(), pattern.into_inner(), line);
    let found = world
        .report()
        .findings()
        .any(|f| f.file == expected.0 && f.pattern == expected.1 && f.line_number == line);
    assert!(found, "no finding {expected:?}:\n{}", world.output);
}

#[then("the report says \"{line}\"")]
fn then_report_says(world: &mut ScanWorld, line: Quoted) {
    let expected = line.into_inner();
    assert!(
        world.has_line(|candidate| candidate == expected),
        "missing {expected:?} in:\n{}",
        world.output
    );
}

#[then("the report has a line starting with \"{prefix}\"")]
fn then_report_line_starts_with(world: &mut ScanWorld, prefix: Quoted) {
    let expected = prefix.into_inner();
    assert!(
        world.has_line(|candidate| candidate.starts_with(expected.as_str())),
        "no line starting with {expected:?} in:\n{}",
        world.output
    );
}

#[then("the report ends with \"{line}\"")]
fn then_report_ends_with(world: &mut ScanWorld, line: Quoted) {
    let expected = line.into_inner();
    assert_eq!(world.output.lines().last(), Some(expected.as_str()));
}

#[scenario(
    path = "tests/features/leak_scan.feature",
    name = "A Windows user path is reported"
)]
fn scenario_windows_user_path(world: ScanWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/leak_scan.feature",
    name = "A path inside a comment is ignored"
)]
fn scenario_comment_ignored(world: ScanWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/leak_scan.feature",
    name = "A missing file fails the scan without stopping it"
)]
fn scenario_missing_file(world: ScanWorld) {
    drop(world);
}

#[cfg(target_os = "linux")]
#[scenario(
    path = "tests/features/leak_scan.feature",
    name = "An unreadable file fails the scan without hiding other files"
)]
fn scenario_unreadable_file(world: ScanWorld) {
    drop(world);
}
