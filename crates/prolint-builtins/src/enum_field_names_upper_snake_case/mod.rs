//! Enum field naming rule.

use prolint_rule::{Failure, Rule, RuleError, Severity, strs};
use prolint_syntax::Proto;

/// Verifies that all enum field names are `CAPITALS_WITH_UNDERSCORES`.
///
/// Nested enums are checked the same way as top-level ones.
#[derive(Debug, Clone, Copy)]
pub struct EnumFieldNamesUpperSnakeCaseRule {
    severity: Severity,
}

impl EnumFieldNamesUpperSnakeCaseRule {
    /// Creates the rule with the given severity.
    #[must_use]
    pub const fn new(severity: Severity) -> Self {
        Self { severity }
    }
}

impl Rule for EnumFieldNamesUpperSnakeCaseRule {
    fn id(&self) -> &str {
        "ENUM_FIELD_NAMES_UPPER_SNAKE_CASE"
    }

    fn purpose(&self) -> &str {
        "Verifies that all enum field names are CAPITALS_WITH_UNDERSCORES."
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
            for field in &definition.fields {
                if !strs::is_upper_snake_case(&field.name) {
                    failures.push(Failure::new(
                        proto.filename.clone(),
                        field.pos,
                        self.id(),
                        self.severity,
                        format!(
                            "EnumField name {:?} must be CAPITALS_WITH_UNDERSCORES",
                            field.name
                        ),
                    ));
                }
            }
        }
        Ok(failures)
    }
}
