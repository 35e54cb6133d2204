//! Plugin entrypoint: serves the enum naming rule to a prolint host.

use std::io::Write;
use std::process::ExitCode;

use prolint_plugin_sdk::{RuleEntry, RuleSetRegistry, serve};

use prolint_plugin_enum_style::EnumNamesLowerSnakeCaseRule;

fn main() -> ExitCode {
    let registry = RuleSetRegistry::new(vec![RuleEntry::generator(
        |severity, verbose, _fix_mode| Box::new(EnumNamesLowerSnakeCaseRule::new(severity, verbose)),
    )]);
    match serve(&registry) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            drop(writeln!(std::io::stderr(), "{err}"));
            ExitCode::FAILURE
        }
    }
}
