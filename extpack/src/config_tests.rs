//! Unit tests for configuration loading.
#![expect(
    clippy::expect_used,
    reason = "test fixtures fail fast when the temporary tree cannot be prepared"
)]

use super::*;
use crate::archive::PackagingError;
use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;

#[fixture]
fn project() -> (TempDir, ProjectRoot) {
    let dir = TempDir::new().expect("temp dir creation succeeds");
    let root = ProjectRoot::from_explicit(dir.path()).expect("explicit root");
    (dir, root)
}

#[rstest]
fn defaults_describe_terminal_start_layout() {
    let config = Config::default();

    assert_eq!(config.addon.name, "terminal-start");
    assert_eq!(config.addon.source_dir, "extension");
    assert_eq!(config.source.name, "terminal-start-source");
    assert_eq!(config.source.files.len(), DEFAULT_SOURCE_FILES.len());
    assert_eq!(config.source.dirs, vec!["src", "extension", "scripts"]);
    assert_eq!(config.archive.compression, Compression::Deflated);
    assert_eq!(config.exclusion.policy, InclusionPolicy::DenyList);
    assert_eq!(config.scan.usernames, vec!["Straightheart"]);
    assert_eq!(config.scan.comment_prefixes, vec!["#", "//"]);
    assert!(config.version.is_none());
}

#[rstest]
fn empty_text_yields_defaults() {
    let config = Config::from_toml_str("").expect("empty config parses");
    assert_eq!(config, Config::default());
}

#[rstest]
fn partial_tables_keep_remaining_defaults() {
    let config = Config::from_toml_str(
        "version = \"2.0.0\"\n[addon]\nname = \"new-tab\"\n[archive]\ncompression = \"stored\"\n",
    )
    .expect("config parses");

    assert_eq!(config.version.as_deref(), Some("2.0.0"));
    assert_eq!(config.addon.name, "new-tab");
    assert_eq!(config.addon.source_dir, "extension");
    assert_eq!(config.archive.compression, Compression::Stored);
    assert_eq!(config.source, SourceConfig::default());
}

#[rstest]
#[case::top_level("verison = \"1.0.0\"\n")]
#[case::nested("[exclusion]\nsufixes = [\".zip\"]\n")]
#[case::bad_policy("[exclusion]\npolicy = \"maybe\"\n")]
fn unknown_keys_and_values_are_rejected(#[case] text: &str) {
    assert!(Config::from_toml_str(text).is_err());
}

#[rstest]
fn load_without_file_uses_defaults(project: (TempDir, ProjectRoot)) {
    let (_dir, root) = project;
    let config = Config::load(&root, None).expect("load succeeds");
    assert_eq!(config, Config::default());
}

#[rstest]
fn load_reads_file_at_root(project: (TempDir, ProjectRoot)) {
    let (dir, root) = project;
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[scan]\nusernames = [\"alice\"]\n",
    )
    .expect("write");

    let config = Config::load(&root, None).expect("load succeeds");
    assert_eq!(config.scan.usernames, vec!["alice"]);
    assert_eq!(config.scan.targets.len(), DEFAULT_SCAN_TARGETS.len());
}

#[rstest]
fn load_reports_file_and_reason(project: (TempDir, ProjectRoot)) {
    let (dir, root) = project;
    fs::write(dir.path().join(CONFIG_FILE_NAME), "[addon]\nname = 3\n").expect("write");

    let err = Config::load(&root, None).expect_err("invalid type");
    assert!(matches!(
        &err,
        ExtpackError::Config { path, .. } if path.ends_with(CONFIG_FILE_NAME)
    ));
}

#[rstest]
fn explicit_config_must_exist(project: (TempDir, ProjectRoot)) {
    let (_dir, root) = project;
    let missing = root.join("other.toml");
    assert!(matches!(
        Config::load(&root, Some(missing.as_path())),
        Err(ExtpackError::Config { .. })
    ));
}

#[rstest]
fn output_dir_is_relative_to_root(project: (TempDir, ProjectRoot)) {
    let (_dir, root) = project;
    let mut config = Config::default();
    assert_eq!(config.output_dir(&root), root.as_path());

    config.output_dir = Some("dist".to_owned());
    assert_eq!(config.output_dir(&root), root.join("dist"));
}

#[rstest]
fn default_selection_is_valid() {
    let selection = SourceConfig::default().selection().expect("defaults are valid");
    assert_eq!(selection.files().len(), DEFAULT_SOURCE_FILES.len());
    assert_eq!(selection.dirs().len(), DEFAULT_SOURCE_DIRS.len());
}

#[rstest]
#[case::absolute(vec!["/etc/hosts".to_owned()], vec![])]
#[case::escaping(vec![], vec!["../sibling".to_owned()])]
fn selection_rejects_paths_outside_root(#[case] files: Vec<String>, #[case] dirs: Vec<String>) {
    let config = SourceConfig {
        files,
        dirs,
        ..SourceConfig::default()
    };
    assert!(matches!(
        config.selection(),
        Err(ExtpackError::Packaging(PackagingError::InvalidEntryPath { .. }))
    ));
}

#[rstest]
fn selection_rejects_overlap() {
    let config = SourceConfig {
        files: vec!["src/main.tsx".to_owned()],
        ..SourceConfig::default()
    };
    assert!(matches!(
        config.selection(),
        Err(ExtpackError::Packaging(PackagingError::Overlap { .. }))
    ));
}

#[rstest]
fn allow_list_policy_reaches_filter() {
    let config = Config::from_toml_str(
        "[exclusion]\npolicy = \"allow-list\"\nallowed_suffixes = [\".js\", \".json\"]\n",
    )
    .expect("config parses");
    let filter = config.exclusion.filter();

    assert_eq!(filter.policy(), InclusionPolicy::AllowList);
    assert!(filter.allows_file("manifest.json"));
    assert!(!filter.allows_file("README.md"));
    assert!(!filter.allows_dir("node_modules"));
}

#[rstest]
fn custom_exclusions_replace_defaults() {
    let config = Config::from_toml_str("[exclusion]\ndirs = [\"coverage\"]\n").expect("parses");
    let filter = config.exclusion.filter();

    assert!(!filter.allows_dir("coverage"));
    assert!(filter.allows_dir("node_modules"));
    assert!(!filter.allows_file("old.zip"));
}
