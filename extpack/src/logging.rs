//! Subscriber installation for the binaries.
//!
//! The library logs through the `log` facade. The binaries install a
//! `tracing-subscriber` formatter on stderr, which also receives `log`
//! records, so report output on stdout stays clean. `RUST_LOG` takes
//! precedence over the level chosen on the command line.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Map `-v` occurrences and `-q` to a level.
///
/// Warnings are shown by default; each `-v` steps through `info`, `debug`
/// and `trace`. `quiet` wins and limits output to errors.
#[must_use]
pub const fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber at `level`.
///
/// A second call is a no-op; the first subscriber stays in place.
pub fn init(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        log::debug!("log subscriber already installed");
    }
}
