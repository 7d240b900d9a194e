//! Leak scanning binary.
//!
//! Thin CLI wrapper around [`extpack::commands::scan`]. Prints the report on
//! stdout and exits with status 1 when any target has findings, is missing
//! or cannot be read.

use clap::Parser;
use extpack::cli::ScanCli;
use extpack::commands;
use extpack::error::Result;
use extpack::logging;
use extpack::output::{exit_code, write_line};
use extpack::scan::{format_human, format_json};
use std::io::Write;

fn main() {
    let cli = ScanCli::parse();
    logging::init(cli.common.log_level());
    let result = run(&cli, &mut std::io::stdout());
    let code = exit_code(result, &mut std::io::stderr());
    if code != 0 {
        std::process::exit(code);
    }
}

/// Scan the requested targets, print the report and return the verdict.
fn run(cli: &ScanCli, stdout: &mut dyn Write) -> Result<bool> {
    let report = commands::scan(cli)?;
    if cli.json {
        write_line(stdout, &format_json(&report));
    } else if stdout.write_all(format_human(&report).as_bytes()).is_err() {
        // The verdict still decides the exit status.
    }
    Ok(report.passed())
}
