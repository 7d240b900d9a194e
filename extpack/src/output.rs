//! Terminal output shared by the binaries.
//!
//! The binaries write through `&mut dyn Write` handles so their messages
//! and exit codes can be checked without spawning a process.

use crate::error::Result;
use std::io::Write;

/// Write `message` followed by a newline, ignoring write failures.
pub fn write_line(out: &mut dyn Write, message: &str) {
    if writeln!(out, "{message}").is_err() {
        // Nowhere left to report a closed stream.
    }
}

/// Map a run result to a process exit code.
///
/// `Ok(true)` is success. `Ok(false)` is a failed check that has already
/// been reported. Errors are written to `stderr` as `error: <message>`.
pub fn exit_code(result: Result<bool>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(err) => {
            write_line(stderr, &format!("error: {err}"));
            1
        }
    }
}
