//! The `Rule` capability trait and its application error.

use thiserror::Error;

use prolint_syntax::Proto;

use crate::report::Failure;
use crate::severity::Severity;

/// A lint rule the host can apply to a parsed proto file.
///
/// Implementations must be cheap to share: the linter applies one rule
/// instance to many files. Remote rules implement this trait by
/// forwarding `apply` over a plugin channel, which is exactly why the
/// rest of the linter never needs to know where a rule runs.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// Returns the stable rule id, by convention `UPPER_SNAKE_CASE`.
    fn id(&self) -> &str;

    /// Returns a human-readable description of what the rule enforces.
    fn purpose(&self) -> &str;

    /// Returns whether the rule belongs to the default-enabled set.
    fn is_official(&self) -> bool;

    /// Returns the severity failures from this rule carry.
    fn severity(&self) -> Severity;

    /// Applies the rule to a parse tree.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] when the rule cannot be evaluated at all,
    /// as opposed to evaluating cleanly and reporting violations.
    fn apply(&self, proto: &Proto) -> Result<Vec<Failure>, RuleError>;
}

/// Error raised when a rule cannot be applied to a file.
///
/// Rule implementations that delegate elsewhere (remote plugins, external
/// tooling) attach the underlying failure as a source.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RuleError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl RuleError {
    /// Creates an error from a message alone.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping an underlying cause.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
