//! Source packaging binary.
//!
//! Thin CLI wrapper around [`extpack::commands::package_source`]. Archives the
//! configured project files and directories, rooted at the project root, and
//! prints the archive path on success.

use clap::Parser;
use extpack::cli::SourceCli;
use extpack::commands;
use extpack::error::Result;
use extpack::logging;
use extpack::output::{exit_code, write_line};
use std::io::Write;

fn main() {
    let cli = SourceCli::parse();
    logging::init(cli.common.log_level());
    let result = run(&cli, &mut std::io::stdout());
    let code = exit_code(result, &mut std::io::stderr());
    if code != 0 {
        std::process::exit(code);
    }
}

/// Build the archive and report where it was written.
fn run(cli: &SourceCli, stdout: &mut dyn Write) -> Result<bool> {
    let summary = commands::package_source(cli)?;
    write_line(
        stdout,
        &format!("Successfully created {}", summary.path.display()),
    );
    Ok(true)
}
