//! Zip archive creation for both packaging modes.
//!
//! A whole-subtree build archives one directory rooted at itself; a
//! selective build archives named files plus several subtrees rooted at the
//! project root. Both modes collect entries first, then stream them through
//! one writer that produces byte-identical output for an unchanged tree.

use super::collector::{ArchiveEntry, TreeCollector};
use super::error::PackagingError;
use super::exclusion::ExclusionFilter;
use super::path::ArchivePath;
use log::{debug, info, warn};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime as ZipDateTime, ZipWriter};

/// Unix mode recorded for every entry.
const ENTRY_PERMISSIONS: u32 = 0o644;

/// Compression method applied to every entry of an archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compression {
    /// Deflate compression.
    #[default]
    Deflated,
    /// No compression.
    Stored,
}

impl Compression {
    const fn method(self) -> CompressionMethod {
        match self {
            Self::Deflated => CompressionMethod::Deflated,
            Self::Stored => CompressionMethod::Stored,
        }
    }
}

/// Curated contents of a selective build, relative to the project root.
///
/// Construction rejects selections whose members could produce the same
/// archive path twice: repeated names, files inside a listed subtree and
/// subtrees nested inside one another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    files: Vec<ArchivePath>,
    dirs: Vec<ArchivePath>,
}

impl Selection {
    /// Validate and create a selection.
    ///
    /// # Errors
    ///
    /// Returns [`PackagingError::Overlap`] when two members overlap.
    pub fn new(files: Vec<ArchivePath>, dirs: Vec<ArchivePath>) -> Result<Self, PackagingError> {
        let members: Vec<&ArchivePath> = files.iter().chain(dirs.iter()).collect();
        for (index, first) in members.iter().enumerate() {
            for second in members.iter().skip(index + 1) {
                if first == second {
                    return Err(overlap(first, second));
                }
            }
        }
        for dir in &dirs {
            if let Some(nested) = members
                .iter()
                .find(|member| *member != &dir && member.is_within(dir))
            {
                return Err(overlap(dir, nested));
            }
        }
        Ok(Self { files, dirs })
    }

    /// Individual files included by name.
    #[must_use]
    pub fn files(&self) -> &[ArchivePath] {
        &self.files
    }

    /// Subtrees included in full, minus exclusions.
    #[must_use]
    pub fn dirs(&self) -> &[ArchivePath] {
        &self.dirs
    }
}

fn overlap(first: &ArchivePath, second: &ArchivePath) -> PackagingError {
    PackagingError::Overlap {
        first: first.to_string(),
        second: second.to_string(),
    }
}

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Where the archive was written.
    pub path: PathBuf,
    /// Entry names in the order they were written.
    pub entries: Vec<ArchivePath>,
    /// Lowercase hex SHA-256 digest of the finished archive.
    pub sha256: String,
}

/// Builds zip archives from source trees.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveBuilder<'a> {
    filter: &'a ExclusionFilter,
    compression: Compression,
}

impl<'a> ArchiveBuilder<'a> {
    /// Create a builder sharing one exclusion filter across both modes.
    #[must_use]
    pub const fn new(filter: &'a ExclusionFilter, compression: Compression) -> Self {
        Self {
            filter,
            compression,
        }
    }

    /// Archive `source_root` in full, with entry names relative to itself.
    ///
    /// Any file already at `output` is removed first. A missing
    /// `source_root` produces a valid archive with no entries.
    ///
    /// # Errors
    ///
    /// Returns an I/O, walk or zip error when reading or writing fails.
    pub fn build_subtree(
        &self,
        source_root: &Path,
        output: &Path,
    ) -> Result<ArchiveSummary, PackagingError> {
        remove_stale_output(output)?;
        let entries = TreeCollector::new(self.filter).collect(source_root, source_root)?;
        self.write_archive(output, &entries)
    }

    /// Archive the files and subtrees of `selection` beneath `project_root`.
    ///
    /// Missing files and missing subtrees are skipped; when nothing is
    /// present the archive is written with no entries. Any file already at
    /// `output` is removed first.
    ///
    /// # Errors
    ///
    /// Returns an I/O, walk or zip error when reading or writing fails.
    pub fn build_selection(
        &self,
        project_root: &Path,
        selection: &Selection,
        output: &Path,
    ) -> Result<ArchiveSummary, PackagingError> {
        remove_stale_output(output)?;

        let mut entries = Vec::new();
        for file in selection.files() {
            let source = project_root.join(file.as_str());
            if source.is_file() {
                entries.push(ArchiveEntry {
                    source,
                    archive_path: file.clone(),
                });
            } else {
                debug!("optional file {file} not present; skipping");
            }
        }

        let collector = TreeCollector::new(self.filter);
        for dir in selection.dirs() {
            entries.extend(collector.collect(&project_root.join(dir.as_str()), project_root)?);
        }

        self.write_archive(output, &entries)
    }

    /// Write `entries` to a temporary file beside `output`, then rename it
    /// into place.
    fn write_archive(
        &self,
        output: &Path,
        entries: &[ArchiveEntry],
    ) -> Result<ArchiveSummary, PackagingError> {
        ensure_unique(entries)?;
        if entries.is_empty() {
            warn!("no eligible files; writing an empty archive to {}", output.display());
        }

        let parent = output_dir(output);
        fs::create_dir_all(parent)?;
        let mut staged = tempfile::Builder::new()
            .prefix(".extpack-")
            .suffix(".partial")
            .tempfile_in(parent)?;

        let options = SimpleFileOptions::default()
            .compression_method(self.compression.method())
            .last_modified_time(ZipDateTime::default())
            .unix_permissions(ENTRY_PERMISSIONS);
        let mut zip = ZipWriter::new(staged.as_file_mut());
        for entry in entries {
            let mut source = fs::File::open(&entry.source)?;
            zip.start_file(entry.archive_path.as_str(), options)?;
            io::copy(&mut source, &mut zip)?;
        }
        zip.finish()?;

        staged
            .persist(output)
            .map_err(|err| PackagingError::Persist {
                path: output.to_path_buf(),
                source: err.error,
            })?;

        let sha256 = compute_sha256(output)?;
        info!(
            "wrote {} entries to {} (sha256 {sha256})",
            entries.len(),
            output.display()
        );
        Ok(ArchiveSummary {
            path: output.to_path_buf(),
            entries: entries.iter().map(|e| e.archive_path.clone()).collect(),
            sha256,
        })
    }
}

/// Delete a previous archive at `output`.
///
/// Returns true when a file was removed. A missing file is not an error.
///
/// # Errors
///
/// Returns [`PackagingError::Io`] when the file exists but cannot be removed.
pub fn remove_stale_output(output: &Path) -> Result<bool, PackagingError> {
    match fs::remove_file(output) {
        Ok(()) => {
            debug!("removed stale archive {}", output.display());
            Ok(true)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Compute the lowercase hex SHA-256 digest of a file.
///
/// # Errors
///
/// Returns [`PackagingError::Io`] if the file cannot be read.
pub fn compute_sha256(path: &Path) -> Result<String, PackagingError> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(buffer.get(..bytes_read).unwrap_or_default());
    }
    Ok(format!("{:x}", hasher.finalize()))
}

fn ensure_unique(entries: &[ArchiveEntry]) -> Result<(), PackagingError> {
    let mut seen = BTreeSet::new();
    for entry in entries {
        if !seen.insert(&entry.archive_path) {
            return Err(PackagingError::DuplicateEntry {
                path: entry.archive_path.to_string(),
            });
        }
    }
    Ok(())
}

fn output_dir(output: &Path) -> &Path {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
