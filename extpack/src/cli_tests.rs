//! Tests for CLI parsing and default behaviours.

use super::*;
use clap::CommandFactory;
use rstest::rstest;

#[test]
fn addon_parses_defaults() {
    let cli = AddonCli::parse_from(["extpack-addon"]);
    assert_eq!(cli, AddonCli::default());
    assert_eq!(cli.common.log_level(), LevelFilter::WARN);
}

#[test]
fn source_parses_output_and_root() {
    let cli = SourceCli::parse_from([
        "extpack-source",
        "--project-root",
        "../app",
        "-o",
        "dist/source.zip",
    ]);
    assert_eq!(cli.common.project_root, Some(Utf8PathBuf::from("../app")));
    assert_eq!(cli.output, Some(Utf8PathBuf::from("dist/source.zip")));
}

#[test]
fn scan_parses_targets_and_json() {
    let cli = ScanCli::parse_from(["extpack-scan", "--json", "a.js", "scripts/b.js"]);
    assert!(cli.json);
    assert_eq!(cli.targets, vec!["a.js", "scripts/b.js"]);
}

#[test]
fn scan_without_targets_uses_configuration() {
    let cli = ScanCli::parse_from(["extpack-scan"]);
    assert!(cli.targets.is_empty());
    assert!(!cli.json);
}

#[rstest]
#[case::quiet(&["extpack-scan", "-q"], LevelFilter::ERROR)]
#[case::default(&["extpack-scan"], LevelFilter::WARN)]
#[case::verbose(&["extpack-scan", "-v"], LevelFilter::INFO)]
#[case::very_verbose(&["extpack-scan", "-vv"], LevelFilter::DEBUG)]
#[case::saturates(&["extpack-scan", "-vvvvv"], LevelFilter::TRACE)]
fn verbosity_flags_select_level(#[case] args: &[&str], #[case] expected: LevelFilter) {
    let cli = ScanCli::parse_from(args);
    assert_eq!(cli.common.log_level(), expected);
}

#[test]
fn verbose_and_quiet_conflict() {
    let result = AddonCli::try_parse_from(["extpack-addon", "-v", "-q"]);
    assert!(result.is_err());
}

#[test]
fn config_flag_is_accepted_by_every_binary() {
    for cli in [
        AddonCli::parse_from(["extpack-addon", "--config", "ci.toml"]).common,
        SourceCli::parse_from(["extpack-source", "--config", "ci.toml"]).common,
        ScanCli::parse_from(["extpack-scan", "--config", "ci.toml"]).common,
    ] {
        assert_eq!(cli.config, Some(Utf8PathBuf::from("ci.toml")));
    }
}

#[test]
fn command_definitions_are_consistent() {
    AddonCli::command().debug_assert();
    SourceCli::command().debug_assert();
    ScanCli::command().debug_assert();
}
