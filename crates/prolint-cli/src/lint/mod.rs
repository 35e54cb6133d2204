//! The lint engine: rule collection, application, and reporting.

use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use prolint_plugins::{PluginError, PluginLaunch, external_rules, launch_all};
use prolint_rule::{Failure, Rule, RuleError};
use prolint_syntax::SyntaxError;

/// Tracing target for the lint engine.
const LINT_TARGET: &str = "prolint_cli::lint";

/// How a lint run ended, short of an internal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintOutcome {
    /// No rule reported a failure.
    Clean,
    /// At least one rule reported a failure.
    Findings,
}

/// Internal failures, as opposed to ordinary lint findings.
#[derive(Debug, Error)]
pub enum CliError {
    /// Launching or talking to a plugin failed.
    #[error(transparent)]
    Plugin(#[from] PluginError),

    /// A target file could not be read or parsed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A rule failed to evaluate.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Writing the report failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Builds the full rule set: built-ins first, then plugin rules in
/// configuration order.
///
/// Plugins launch sequentially; each gets one persistent process and one
/// connection held for the remainder of the run (the adapters keep their
/// channels alive). A failing plugin aborts collection.
///
/// # Errors
///
/// Returns the first launch, handshake, or listing error encountered.
pub fn collect_rules(
    plugins: &[String],
    verbose: bool,
    fix_mode: bool,
) -> Result<Vec<Box<dyn Rule>>, CliError> {
    let mut rules = prolint_builtins::default_rules();

    let launches = plugins
        .iter()
        .map(|command| PluginLaunch::parse(command))
        .collect::<Result<Vec<_>, _>>()?;
    let channels = launch_all(&launches)?;
    rules.extend(external_rules(&channels, verbose, fix_mode)?);

    debug!(
        target: LINT_TARGET,
        rule_count = rules.len(),
        plugin_count = plugins.len(),
        "collected rule set"
    );
    Ok(rules)
}

/// Parses every file once and applies each default-enabled rule to it.
///
/// Failures accumulate in file order, then rule order, so output is
/// deterministic for a given rule set.
///
/// # Errors
///
/// Returns the first parse or rule-evaluation error; there is no partial
/// failure list for a file that failed to parse.
pub fn lint_files(
    rules: &[Box<dyn Rule>],
    files: &[PathBuf],
) -> Result<Vec<Failure>, CliError> {
    let mut failures = Vec::new();
    for file in files {
        let proto = prolint_syntax::parse_file(file)?;
        for rule in rules.iter().filter(|rule| rule.is_official()) {
            failures.extend(rule.apply(&proto)?);
        }
    }
    Ok(failures)
}

/// Writes one line per failure.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_failures(writer: &mut impl Write, failures: &[Failure]) -> Result<(), CliError> {
    for failure in failures {
        writeln!(writer, "{failure}")?;
    }
    Ok(())
}
