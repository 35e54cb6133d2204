//! Message naming rule.

use prolint_rule::{Failure, Rule, RuleError, Severity, strs};
use prolint_syntax::Proto;

/// Verifies that all message names are CamelCase with an initial capital.
///
/// Nested messages are checked the same way as top-level ones.
#[derive(Debug, Clone, Copy)]
pub struct MessageNamesUpperCamelCaseRule {
    severity: Severity,
}

impl MessageNamesUpperCamelCaseRule {
    /// Creates the rule with the given severity.
    #[must_use]
    pub const fn new(severity: Severity) -> Self {
        Self { severity }
    }
}

impl Rule for MessageNamesUpperCamelCaseRule {
    fn id(&self) -> &str {
        "MESSAGE_NAMES_UPPER_CAMEL_CASE"
    }

    fn purpose(&self) -> &str {
        "Verifies that all message names are CamelCase (with an initial capital)."
    }

    fn is_official(&self) -> bool {
        true
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn apply(&self, proto: &Proto) -> Result<Vec<Failure>, RuleError> {
        let mut failures = Vec::new();
        for message in proto.all_messages() {
            if !strs::is_upper_camel_case(&message.name) {
                failures.push(Failure::new(
                    proto.filename.clone(),
                    message.pos,
                    self.id(),
                    self.severity,
                    format!("Message name {:?} must be UpperCamelCase", message.name),
                ));
            }
        }
        Ok(failures)
    }
}
