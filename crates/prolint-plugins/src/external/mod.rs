//! The remote rule adapter.
//!
//! An [`ExternalRule`] wraps one entry of a plugin's `list_rules` reply
//! together with the channel it arrived on, and implements the local
//! [`Rule`] capability by forwarding `apply` over that channel. To the
//! rest of the linter a remote rule is indistinguishable from a built-in
//! one.

use std::sync::Arc;

use prolint_rule::{Failure, Rule, RuleError, Severity};
use prolint_syntax::Proto;

use crate::channel::RuleSetChannel;
use crate::error::PluginError;
use crate::protocol::{ApplyRequest, RuleMeta};

/// A rule served by a plugin process.
///
/// Identity, purpose, and severity are captured once from the listing
/// entry and never change afterwards; in particular the severity is
/// already mapped fail-closed from the wire value at construction time.
pub struct ExternalRule {
    id: String,
    purpose: String,
    severity: Severity,
    channel: Arc<dyn RuleSetChannel>,
}

impl ExternalRule {
    /// Wraps one listing entry and the channel it was received on.
    #[must_use]
    pub fn new(meta: &RuleMeta, channel: Arc<dyn RuleSetChannel>) -> Self {
        Self {
            id: meta.id.clone(),
            purpose: meta.purpose.clone(),
            severity: meta.severity.to_severity(),
            channel,
        }
    }
}

impl Rule for ExternalRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn purpose(&self) -> &str {
        &self.purpose
    }

    /// Every remote rule is unconditionally part of the default set;
    /// plugins cannot register a non-default rule.
    fn is_official(&self) -> bool {
        true
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn apply(&self, proto: &Proto) -> Result<Vec<Failure>, RuleError> {
        let relative = proto.filename.clone();
        let absolute = std::path::absolute(&relative).map_err(|source| {
            remote_error(
                &self.id,
                PluginError::PathResolution {
                    path: relative.clone(),
                    source: Arc::new(source),
                },
            )
        })?;

        let failures = self
            .channel
            .apply(&ApplyRequest {
                id: self.id.clone(),
                path: absolute,
            })
            .map_err(|err| remote_error(&self.id, err))?;

        // Failure records always carry the host's own relative filename,
        // never anything derived from the plugin's view of the path.
        Ok(failures
            .into_iter()
            .map(|failure| {
                Failure::new(
                    relative.clone(),
                    failure.pos.to_position(),
                    &self.id,
                    self.severity,
                    failure.message,
                )
            })
            .collect())
    }
}

fn remote_error(id: &str, source: PluginError) -> RuleError {
    RuleError::with_source(format!("applying remote rule '{id}': {source}"), source)
}

impl std::fmt::Debug for ExternalRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalRule")
            .field("id", &self.id)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
