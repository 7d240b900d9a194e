//! Log records emitted while packaging and scanning.
//!
//! `logtest` installs a process-wide logger, so this file holds a single
//! test.
#![expect(
    clippy::expect_used,
    reason = "test setup fails fast when the temporary tree cannot be prepared"
)]

use extpack::commands::Session;
use extpack::config::Config;
use extpack::project::ProjectRoot;
use logtest::Logger;
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, relative: &str, contents: &str) {
    let path = dir.path().join(relative);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, contents).expect("write");
}

#[test]
fn packaging_and_scanning_report_progress() {
    let mut logger = Logger::start();
    let dir = TempDir::new().expect("temp dir");
    write(&dir, "extension/manifest.json", "{}");
    write(&dir, "extension/node_modules/react/index.js", "react()");

    let mut config = Config::default();
    config.version = Some("1.0.0".to_owned());
    let root = ProjectRoot::from_explicit(dir.path()).expect("explicit root");
    let session = Session::new(root, config);
    session.package_addon(None).expect("build succeeds");
    let report = session
        .scan(&["absent.js".to_owned()], None)
        .expect("scan completes");
    assert!(!report.passed());

    let mut messages = Vec::new();
    while let Some(record) = logger.pop() {
        messages.push(record.args().to_string());
    }

    let logged = |needle: &str| messages.iter().any(|message| message.contains(needle));
    assert!(
        logged("pruning excluded directory"),
        "expected node_modules to be pruned: {messages:?}"
    );
    assert!(logged("wrote 1 entries"), "expected a summary: {messages:?}");
    assert!(
        logged("scan target absent.js not found"),
        "expected a missing-target warning: {messages:?}"
    );
}
