//! An example prolint plugin enforcing lower-snake-case enum names.
//!
//! The crate doubles as the reference for plugin authors and as the
//! end-to-end test vehicle for the plugin protocol. Its single rule is
//! registered through a generator so it can adapt its message to the
//! host's verbose flag; see `src/main.rs` for the registration.

use prolint_rule::{Failure, Rule, RuleError, Severity, strs};
use prolint_syntax::Proto;

/// Verifies that all enum names are `lower_snake_case`.
///
/// In verbose mode the failure message also suggests the conforming
/// name. The severity is whatever the registry resolved the generator
/// with.
#[derive(Debug, Clone, Copy)]
pub struct EnumNamesLowerSnakeCaseRule {
    severity: Severity,
    verbose: bool,
}

impl EnumNamesLowerSnakeCaseRule {
    /// Creates the rule for one listing cycle.
    #[must_use]
    pub const fn new(severity: Severity, verbose: bool) -> Self {
        Self { severity, verbose }
    }
}

impl Rule for EnumNamesLowerSnakeCaseRule {
    fn id(&self) -> &str {
        "ENUM_NAMES_LOWER_SNAKE_CASE"
    }

    fn purpose(&self) -> &str {
        "Verifies that all enum names are LowerSnakeCase."
    }

    fn is_official(&self) -> bool {
        true
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn apply(&self, proto: &Proto) -> Result<Vec<Failure>, RuleError> {
        let mut failures = Vec::new();
        for definition in proto.all_enums() {
            if strs::is_lower_snake_case(&definition.name) {
                continue;
            }
            let message = if self.verbose {
                format!(
                    "Enum name {:?} must be underscore_separated_names; consider renaming it to {:?}",
                    definition.name,
                    strs::to_lower_snake_case(&definition.name)
                )
            } else {
                format!(
                    "Enum name {:?} must be underscore_separated_names",
                    definition.name
                )
            };
            failures.push(Failure::new(
                proto.filename.clone(),
                definition.pos,
                self.id(),
                self.severity,
                message,
            ));
        }
        Ok(failures)
    }
}
