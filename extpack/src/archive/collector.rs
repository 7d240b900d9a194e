//! Ordered directory walks for archive entry collection.
//!
//! The collector walks depth-first with siblings sorted by file name, so two
//! walks of an unchanged tree always yield the same sequence. Excluded
//! directories are pruned before the walk descends into them; dependency
//! installs can be huge or unreadable and are never visited.

use super::error::PackagingError;
use super::exclusion::ExclusionFilter;
use super::path::ArchivePath;
use log::{debug, trace};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// One file scheduled for packaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Absolute (or caller-rooted) path of the file on disk.
    pub source: PathBuf,
    /// Name of the entry inside the archive.
    pub archive_path: ArchivePath,
}

/// Walks source trees and yields eligible entries in a stable order.
#[derive(Debug, Clone, Copy)]
pub struct TreeCollector<'a> {
    filter: &'a ExclusionFilter,
}

impl<'a> TreeCollector<'a> {
    /// Create a collector that applies `filter` to every directory and file.
    #[must_use]
    pub const fn new(filter: &'a ExclusionFilter) -> Self {
        Self { filter }
    }

    /// Collect every eligible file beneath `root`.
    ///
    /// Archive paths are computed relative to `logical_root`, which must be
    /// `root` itself or one of its ancestors. A missing `root` yields no
    /// entries; callers that need the directory must check for it first.
    ///
    /// Symbolic links are not followed and are left out of the archive.
    ///
    /// # Errors
    ///
    /// Returns [`PackagingError::Walk`] when a directory inside the tree
    /// cannot be read, or [`PackagingError::InvalidEntryPath`] when a file
    /// name cannot be represented as an archive path.
    pub fn collect(
        &self,
        root: &Path,
        logical_root: &Path,
    ) -> Result<Vec<ArchiveEntry>, PackagingError> {
        if !root.is_dir() {
            debug!("skipping missing source root {}", root.display());
            return Ok(Vec::new());
        }

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| self.is_walkable(entry));

        let mut entries = Vec::new();
        for walked in walker {
            let entry = walked?;
            if !entry.file_type().is_file() {
                if entry.path_is_symlink() {
                    trace!("skipping symbolic link {}", entry.path().display());
                }
                continue;
            }
            if !self.filter.allows_file(&entry.file_name().to_string_lossy()) {
                trace!("excluding {}", entry.path().display());
                continue;
            }
            let archive_path = relative_archive_path(entry.path(), logical_root)?;
            entries.push(ArchiveEntry {
                source: entry.into_path(),
                archive_path,
            });
        }
        Ok(entries)
    }

    /// Decide before descending whether a directory is walked at all.
    fn is_walkable(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        let allowed = entry
            .file_name()
            .to_str()
            .is_none_or(|name| self.filter.allows_dir(name));
        if !allowed {
            debug!("pruning excluded directory {}", entry.path().display());
        }
        allowed
    }
}

fn relative_archive_path(
    path: &Path,
    logical_root: &Path,
) -> Result<ArchivePath, PackagingError> {
    let relative = path
        .strip_prefix(logical_root)
        .map_err(|_| PackagingError::InvalidEntryPath {
            path: path.display().to_string(),
        })?;
    ArchivePath::from_relative(relative)
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test fixtures fail fast when the temporary tree cannot be prepared"
)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    #[fixture]
    fn tree() -> TempDir {
        let dir = TempDir::new().expect("temp dir creation succeeds");
        let root = dir.path();
        for (path, contents) in [
            ("manifest.json", "{}"),
            ("newtab.html", "<html></html>"),
            ("assets/index-abc.js", "console.log(1)"),
            ("assets/index-abc.css", "body{}"),
            (".git/HEAD", "ref: refs/heads/main"),
            ("node_modules/react/index.js", "module.exports = {}"),
            ("icons/.DS_Store", "junk"),
            ("old-build.zip", "PK"),
        ] {
            let full = root.join(path);
            fs::create_dir_all(full.parent().expect("parent")).expect("mkdir");
            fs::write(full, contents).expect("write");
        }
        dir
    }

    fn archive_names(entries: &[ArchiveEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|entry| entry.archive_path.as_str().to_owned())
            .collect()
    }

    #[rstest]
    fn collect_skips_excluded_entries(tree: TempDir) {
        let filter = ExclusionFilter::default();
        let entries = TreeCollector::new(&filter)
            .collect(tree.path(), tree.path())
            .expect("walk succeeds");

        assert_eq!(
            archive_names(&entries),
            vec![
                "assets/index-abc.css",
                "assets/index-abc.js",
                "manifest.json",
                "newtab.html",
            ]
        );
    }

    #[rstest]
    fn collect_is_stable_across_runs(tree: TempDir) {
        let filter = ExclusionFilter::default();
        let collector = TreeCollector::new(&filter);
        let first = collector.collect(tree.path(), tree.path()).expect("walk");
        let second = collector.collect(tree.path(), tree.path()).expect("walk");
        assert_eq!(first, second);
    }

    #[rstest]
    fn collect_relative_to_ancestor_keeps_prefix(tree: TempDir) {
        let filter = ExclusionFilter::default();
        let entries = TreeCollector::new(&filter)
            .collect(&tree.path().join("assets"), tree.path())
            .expect("walk");
        assert_eq!(
            archive_names(&entries),
            vec!["assets/index-abc.css", "assets/index-abc.js"]
        );
    }

    #[rstest]
    fn collect_produces_unique_forward_slash_paths(tree: TempDir) {
        let filter = ExclusionFilter::default();
        let entries = TreeCollector::new(&filter)
            .collect(tree.path(), tree.path())
            .expect("walk");
        let unique: BTreeSet<_> = entries.iter().map(|e| &e.archive_path).collect();
        assert_eq!(unique.len(), entries.len());
        for entry in &entries {
            assert!(!entry.archive_path.as_str().contains('\\'));
            assert!(!entry.archive_path.as_str().starts_with('/'));
            assert!(entry.source.is_file());
        }
    }

    #[test]
    fn collect_missing_root_yields_nothing() {
        let dir = TempDir::new().expect("temp dir");
        let filter = ExclusionFilter::default();
        let entries = TreeCollector::new(&filter)
            .collect(&dir.path().join("extension"), dir.path())
            .expect("missing root is not an error");
        assert!(entries.is_empty());
    }

    #[rstest]
    fn collect_honours_allow_list(tree: TempDir) {
        let filter = ExclusionFilter::default().with_allow_list(vec![".js".to_owned()]);
        let entries = TreeCollector::new(&filter)
            .collect(tree.path(), tree.path())
            .expect("walk");
        assert_eq!(archive_names(&entries), vec!["assets/index-abc.js"]);
    }

    #[test]
    fn collect_rejects_root_outside_logical_root() {
        let outer = TempDir::new().expect("temp dir");
        let other = TempDir::new().expect("temp dir");
        fs::write(outer.path().join("a.txt"), "a").expect("write");
        let filter = ExclusionFilter::default();
        let result = TreeCollector::new(&filter).collect(outer.path(), other.path());
        assert!(matches!(
            result,
            Err(PackagingError::InvalidEntryPath { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn collect_skips_symbolic_links() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("real.txt"), "real").expect("write");
        std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("link.txt"))
            .expect("symlink");
        let filter = ExclusionFilter::default();
        let entries = TreeCollector::new(&filter)
            .collect(dir.path(), dir.path())
            .expect("walk");
        assert_eq!(archive_names(&entries), vec!["real.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn collect_rejects_backslash_names_that_would_collide() {
        let dir = TempDir::new().expect("temp dir");
        fs::create_dir_all(dir.path().join("a")).expect("mkdir");
        fs::write(dir.path().join("a").join("b.txt"), "nested").expect("write");
        fs::write(dir.path().join(r"a\b.txt"), "flat").expect("write");
        let filter = ExclusionFilter::default();

        let result = TreeCollector::new(&filter).collect(dir.path(), dir.path());

        assert!(
            matches!(&result, Err(PackagingError::InvalidEntryPath { path }) if path.contains('\\')),
            "expected the backslash name to be rejected, got {result:?}"
        );
    }
}
