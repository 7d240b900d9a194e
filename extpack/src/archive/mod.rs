//! Deterministic archive packaging.
//!
//! Both packaging modes share one pipeline so they cannot drift apart:
//! paths are normalized by [`path`], filtered by [`exclusion`], collected in
//! a stable order by [`collector`] and written by [`builder`].
//!
//! # Sub-modules
//!
//! - [`builder`] - Whole-subtree and selective zip builds.
//! - [`collector`] - Ordered, pruning directory walks.
//! - [`error`] - Error types for packaging operations.
//! - [`exclusion`] - Deny-list and allow-list inclusion policy.
//! - [`path`] - Archive-internal path newtype (`ArchivePath`).

pub mod builder;
pub mod collector;
pub mod error;
pub mod exclusion;
pub mod path;

pub use builder::{ArchiveBuilder, ArchiveSummary, Compression, Selection};
pub use collector::{ArchiveEntry, TreeCollector};
pub use error::PackagingError;
pub use exclusion::{ExclusionFilter, InclusionPolicy};
pub use path::ArchivePath;
