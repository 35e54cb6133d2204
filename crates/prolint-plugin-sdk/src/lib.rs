//! Building blocks for prolint rule plugins.
//!
//! A plugin is an independently built binary that serves its rules to a
//! prolint host over the wire contract defined in `prolint-plugins`. The
//! SDK keeps plugin `main` functions to a single call:
//!
//! ```rust,no_run
//! use prolint_plugin_sdk::{RuleEntry, RuleSetRegistry, serve};
//! # #[derive(Debug)]
//! # struct MyRule;
//! # impl prolint_rule::Rule for MyRule {
//! #     fn id(&self) -> &str { "MY_RULE" }
//! #     fn purpose(&self) -> &str { "Example." }
//! #     fn is_official(&self) -> bool { true }
//! #     fn severity(&self) -> prolint_rule::Severity { prolint_rule::Severity::Error }
//! #     fn apply(&self, _: &prolint_syntax::Proto)
//! #         -> Result<Vec<prolint_rule::Failure>, prolint_rule::RuleError> { Ok(vec![]) }
//! # }
//!
//! fn main() -> std::process::ExitCode {
//!     let registry = RuleSetRegistry::new(vec![RuleEntry::rule(MyRule)]);
//!     match serve(&registry) {
//!         Ok(()) => std::process::ExitCode::SUCCESS,
//!         Err(_) => std::process::ExitCode::FAILURE,
//!     }
//! }
//! ```
//!
//! Rules register either as ready-made instances or as generators, which
//! are resolved from the host's verbose and fix-mode flags exactly once
//! per listing cycle. The registry publishes each cycle's rules as an
//! immutable snapshot, so a late `apply` keeps running against the
//! snapshot it started with even while a new listing is being built.

pub mod registry;
pub mod serve;

pub use self::registry::{
    FileParser, ProtoParse, RegistryError, RuleEntry, RuleGenerator, RuleSetRegistry,
};
pub use self::serve::{ServeError, serve, serve_connection};
