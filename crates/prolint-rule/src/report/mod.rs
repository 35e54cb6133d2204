//! Failure records produced by rule application.

use std::path::{Path, PathBuf};

pub use prolint_syntax::Position;

use crate::severity::Severity;

/// One lint finding: a rule violation at a position in a file.
///
/// The filename is always the path the host itself used to reach the
/// file, never anything reported back by a rule implementation, so the
/// displayed location matches the caller's own view of the tree.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use prolint_rule::{Failure, Position, Severity};
///
/// let failure = Failure::new(
///     PathBuf::from("greet.proto"),
///     Position::new(0, 1, 1),
///     "ENUM_NAMES_LOWER_SNAKE_CASE",
///     Severity::Error,
///     "Enum name \"Foo\" must be lower_snake_case",
/// );
/// assert_eq!(
///     failure.to_string(),
///     "[greet.proto:1:1] Enum name \"Foo\" must be lower_snake_case (ENUM_NAMES_LOWER_SNAKE_CASE)",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    filename: PathBuf,
    pos: Position,
    rule_id: String,
    severity: Severity,
    message: String,
}

impl Failure {
    /// Creates a failure record.
    #[must_use]
    pub fn new(
        filename: PathBuf,
        pos: Position,
        rule_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            filename,
            pos,
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
        }
    }

    /// Returns the file the failure was found in.
    #[must_use]
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Returns the source position of the violation.
    #[must_use]
    pub const fn pos(&self) -> Position {
        self.pos
    }

    /// Returns the id of the rule that produced this failure.
    #[must_use]
    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    /// Returns the severity the rule carried when it was applied.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}:{}] {} ({})",
            self.filename.display(),
            self.pos,
            self.message,
            self.rule_id
        )
    }
}
