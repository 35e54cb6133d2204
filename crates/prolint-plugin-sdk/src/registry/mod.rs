//! The plugin-side rule registry.
//!
//! Holds the plugin's declared entries and serves the two wire
//! operations. Every `list_rules` call rebuilds the ID-indexed rule map
//! from scratch, resolving generator entries with the request's flags,
//! and publishes it as an immutable snapshot. `apply` always runs
//! against the snapshot current at lookup time; an id absent from that
//! snapshot fails without side effects.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use prolint_plugins::protocol::{
    ApplyRequest, ListRulesRequest, RuleMeta, RuleSetRequest, RuleSetResponse, WireFailure,
    WirePosition, WireSeverity,
};
use prolint_rule::{Rule, RuleError, Severity};
use prolint_syntax::{Proto, SyntaxError};

/// Parse collaborator consumed by the registry.
///
/// The production implementation is [`FileParser`]; tests substitute
/// doubles to exercise dispatch without touching the filesystem.
#[cfg_attr(test, mockall::automock)]
pub trait ProtoParse: Send + Sync {
    /// Parses the file at `path` into a tree.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] when the file cannot be read or parsed.
    fn parse(&self, path: &Path) -> Result<Proto, SyntaxError>;
}

/// Parses proto files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileParser;

impl ProtoParse for FileParser {
    fn parse(&self, path: &Path) -> Result<Proto, SyntaxError> {
        prolint_syntax::parse_file(path)
    }
}

/// A generator resolving a concrete rule from host-supplied flags.
///
/// Resolved exactly once per listing cycle; the resolved instance, not
/// the generator, answers every `apply` until the next cycle. The
/// severity argument is the registry's configured default severity,
/// passed explicitly so generated rules never have to guess it.
pub type RuleGenerator = Box<dyn Fn(Severity, bool, bool) -> Box<dyn Rule> + Send + Sync>;

/// One declared entry: a ready-made rule or a generator.
pub enum RuleEntry {
    /// A rule instance used unchanged in every cycle.
    Rule(Arc<dyn Rule>),
    /// A generator resolved anew on every listing cycle.
    Generator(RuleGenerator),
}

impl RuleEntry {
    /// Declares a ready-made rule.
    #[must_use]
    pub fn rule(rule: impl Rule + 'static) -> Self {
        Self::Rule(Arc::new(rule))
    }

    /// Declares a generator taking (severity, verbose, fix mode).
    #[must_use]
    pub fn generator(
        generator: impl Fn(Severity, bool, bool) -> Box<dyn Rule> + Send + Sync + 'static,
    ) -> Self {
        Self::Generator(Box::new(generator))
    }
}

impl std::fmt::Debug for RuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rule(rule) => f.debug_tuple("Rule").field(&rule.id()).finish(),
            Self::Generator(_) => f.debug_tuple("Generator").finish(),
        }
    }
}

/// Errors a registry call reports back over the wire.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The requested id is absent from the current snapshot.
    #[error("not found rule={id}")]
    RuleNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The parse collaborator failed on the target file.
    #[error(transparent)]
    Parse(#[from] SyntaxError),

    /// The resolved rule itself failed to apply.
    #[error(transparent)]
    Rule(#[from] RuleError),
}

type Snapshot = Arc<HashMap<String, Arc<dyn Rule>>>;

/// The plugin-side registry serving `list_rules` and `apply`.
pub struct RuleSetRegistry<P = FileParser> {
    entries: Vec<RuleEntry>,
    default_severity: Severity,
    parser: P,
    resolved: RwLock<Snapshot>,
}

impl RuleSetRegistry<FileParser> {
    /// Creates a registry parsing target files from disk.
    #[must_use]
    pub fn new(entries: Vec<RuleEntry>) -> Self {
        Self::with_parser(entries, FileParser)
    }
}

impl<P: ProtoParse> RuleSetRegistry<P> {
    /// Creates a registry with an explicit parse collaborator.
    #[must_use]
    pub fn with_parser(entries: Vec<RuleEntry>, parser: P) -> Self {
        Self {
            entries,
            default_severity: Severity::Error,
            parser,
            resolved: RwLock::new(Arc::new(HashMap::new())),
        }
    }

    /// Overrides the severity handed to generator entries.
    #[must_use]
    pub fn with_default_severity(mut self, severity: Severity) -> Self {
        self.default_severity = severity;
        self
    }

    /// Rebuilds the rule map from scratch and publishes the snapshot.
    ///
    /// Generator entries resolve with the request's flags and the
    /// registry's default severity; ready-made entries pass through
    /// unchanged. Whatever the previous cycle resolved is discarded.
    fn initialize(&self, request: &ListRulesRequest) {
        let mut rules: HashMap<String, Arc<dyn Rule>> = HashMap::with_capacity(self.entries.len());
        for entry in &self.entries {
            let rule: Arc<dyn Rule> = match entry {
                RuleEntry::Rule(instance) => Arc::clone(instance),
                RuleEntry::Generator(generator) => Arc::from(generator(
                    self.default_severity,
                    request.verbose,
                    request.fix_mode,
                )),
            };
            rules.insert(rule.id().to_owned(), rule);
        }
        let snapshot = Arc::new(rules);
        *self
            .resolved
            .write()
            .unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.resolved.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Resolves the rule set for this cycle and lists its metadata.
    ///
    /// Iteration order is unspecified and must not be relied upon.
    pub fn list_rules(&self, request: &ListRulesRequest) -> Vec<RuleMeta> {
        self.initialize(request);
        self.snapshot()
            .values()
            .map(|rule| RuleMeta {
                id: rule.id().to_owned(),
                purpose: rule.purpose().to_owned(),
                severity: WireSeverity::from(rule.severity()),
            })
            .collect()
    }

    /// Applies one rule of the current snapshot to one file.
    ///
    /// Positions are copied into wire failures verbatim; nothing is
    /// reinterpreted across the process boundary.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RuleNotFound`] for an id absent from the
    /// current snapshot, a parse error from the collaborator, or the
    /// rule's own application error.
    pub fn apply(&self, request: &ApplyRequest) -> Result<Vec<WireFailure>, RegistryError> {
        let snapshot = self.snapshot();
        let rule = snapshot
            .get(&request.id)
            .ok_or_else(|| RegistryError::RuleNotFound {
                id: request.id.clone(),
            })?;

        let proto = self.parser.parse(&request.path)?;
        let failures = rule.apply(&proto)?;
        Ok(failures
            .into_iter()
            .map(|failure| WireFailure {
                message: failure.message().to_owned(),
                pos: WirePosition::from_position(failure.pos()),
            })
            .collect())
    }

    /// Serves one decoded request, encoding any call error as a reply.
    #[must_use]
    pub fn dispatch(&self, request: &RuleSetRequest) -> RuleSetResponse {
        match request {
            RuleSetRequest::ListRules(list) => RuleSetResponse::Rules {
                rules: self.list_rules(list),
            },
            RuleSetRequest::Apply(apply) => match self.apply(apply) {
                Ok(failures) => RuleSetResponse::Failures { failures },
                Err(err) => RuleSetResponse::Error {
                    message: err.to_string(),
                },
            },
        }
    }
}

impl<P> std::fmt::Debug for RuleSetRegistry<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSetRegistry")
            .field("entries", &self.entries.len())
            .field("default_severity", &self.default_severity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
