//! Built-in rules shipped with the prolint host.
//!
//! Built-ins implement the same [`prolint_rule::Rule`] capability remote
//! plugin rules are adapted to, so the host registers both kinds in one
//! uniform set. The catalogue here walks the parse tree directly; rules
//! keep no state beyond their configured severity.

pub mod enum_field_names_upper_snake_case;
pub mod message_names_upper_camel_case;

pub use self::enum_field_names_upper_snake_case::EnumFieldNamesUpperSnakeCaseRule;
pub use self::message_names_upper_camel_case::MessageNamesUpperCamelCaseRule;

use prolint_rule::{Rule, Severity};

/// Returns the default built-in rule set.
#[must_use]
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(EnumFieldNamesUpperSnakeCaseRule::new(Severity::Error)),
        Box::new(MessageNamesUpperCamelCaseRule::new(Severity::Error)),
    ]
}
