//! Binary entrypoint mapping lint outcomes onto exit codes.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use prolint_cli::{Cli, LintOutcome, run, telemetry};

/// Exit code for a run whose only findings are lint failures.
const EXIT_LINT_FAILURE: u8 = 1;
/// Exit code for parse, plugin, and other internal failures.
const EXIT_INTERNAL_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init();

    let mut stdout = std::io::stdout().lock();
    match run(&cli, &mut stdout) {
        Ok(LintOutcome::Clean) => ExitCode::SUCCESS,
        Ok(LintOutcome::Findings) => ExitCode::from(EXIT_LINT_FAILURE),
        Err(err) => {
            report_error(&err);
            ExitCode::from(EXIT_INTERNAL_FAILURE)
        }
    }
}

/// Writes the error and its cause chain to stderr.
fn report_error(err: &dyn std::error::Error) {
    let mut stderr = std::io::stderr().lock();
    drop(writeln!(stderr, "prolint: {err}"));
    let mut cause = err.source();
    while let Some(current) = cause {
        drop(writeln!(stderr, "  caused by: {current}"));
        cause = current.source();
    }
}
