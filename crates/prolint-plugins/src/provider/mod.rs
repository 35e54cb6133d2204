//! Collecting remote rules from an ordered list of plugin channels.

use std::sync::Arc;

use tracing::debug;

use prolint_rule::Rule;

use crate::channel::RuleSetChannel;
use crate::error::PluginError;
use crate::external::ExternalRule;
use crate::protocol::ListRulesRequest;

/// Tracing target for rule collection.
const PROVIDER_TARGET: &str = "prolint_plugins::provider";

/// Lists every plugin's rules and wraps them as local rules.
///
/// Channels are visited strictly in the given order and each plugin's
/// rules are appended as a group, so every rule of an earlier plugin
/// precedes every rule of a later one. The host's verbose and fix-mode
/// flags are propagated so plugin-side generators can resolve before
/// declaring themselves.
///
/// # Errors
///
/// Returns the first [`PluginError`] encountered; a failing plugin
/// aborts the whole collection step.
pub fn external_rules(
    channels: &[Arc<dyn RuleSetChannel>],
    verbose: bool,
    fix_mode: bool,
) -> Result<Vec<Box<dyn Rule>>, PluginError> {
    let request = ListRulesRequest { verbose, fix_mode };
    let mut rules: Vec<Box<dyn Rule>> = Vec::new();
    for channel in channels {
        let metas = channel.list_rules(&request)?;
        debug!(
            target: PROVIDER_TARGET,
            rule_count = metas.len(),
            "collected rules from plugin"
        );
        for meta in &metas {
            rules.push(Box::new(ExternalRule::new(meta, Arc::clone(channel))));
        }
    }
    Ok(rules)
}
