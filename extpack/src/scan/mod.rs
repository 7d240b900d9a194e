//! Static leak scanner.
//!
//! Scans a fixed list of files, line by line, for developer-machine paths
//! and usernames that should never ship in a distributed archive. The
//! scanner never modifies anything; it produces a [`ScanReport`] that the
//! caller renders with [`report`] and turns into an exit status.
//!
//! Lines that start with a comment marker are skipped. A path mentioned in
//! an explanatory comment is accepted as a false negative.

pub mod error;
pub mod patterns;
pub mod report;
pub mod scanner;

pub use error::ScanError;
pub use patterns::{LeakPattern, PatternSet};
pub use report::{format_human, format_json};
pub use scanner::{FileReport, LeakScanner, ScanFinding, ScanOutcome, ScanReport};
