//! The `prolint` command-line linter.
//!
//! Wires the pieces together: built-in rules and plugin-served rules
//! merge into one uniform set, every configured file is parsed once, and
//! each default-enabled rule applies to each tree. Exit codes classify
//! the outcome for scripting: `0` clean, `1` lint findings, `2` any
//! internal failure (plugin launch or transport, parse errors, output
//! errors).

pub mod cli;
pub mod lint;
pub mod telemetry;

use std::io::Write;

pub use self::cli::{Cli, Command};
pub use self::lint::{CliError, LintOutcome, collect_rules, lint_files, write_failures};

/// Executes a parsed command, writing findings to `stdout`.
///
/// # Errors
///
/// Returns a [`CliError`] for any failure that is not an ordinary lint
/// finding; findings are reported through the returned [`LintOutcome`].
pub fn run(cli: &Cli, stdout: &mut impl Write) -> Result<LintOutcome, CliError> {
    match &cli.command {
        Command::Lint {
            files,
            plugins,
            verbose,
            fix,
        } => {
            let rules = collect_rules(plugins, *verbose, *fix)?;
            let failures = lint_files(&rules, files)?;
            write_failures(stdout, &failures)?;
            if failures.is_empty() {
                Ok(LintOutcome::Clean)
            } else {
                Ok(LintOutcome::Findings)
            }
        }
        Command::List => {
            for rule in prolint_builtins::default_rules() {
                writeln!(stdout, "{}: {}", rule.id(), rule.purpose())
                    .map_err(CliError::Output)?;
            }
            Ok(LintOutcome::Clean)
        }
    }
}
