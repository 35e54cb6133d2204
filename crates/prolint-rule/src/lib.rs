//! The local rule capability shared by every part of the prolint linter.
//!
//! A [`Rule`] reports its identity (`id`, `purpose`, `is_official`), a
//! [`Severity`], and applies itself to a parsed proto file to produce
//! [`Failure`] records. Built-in rules, plugin-side rules, and the host's
//! remote rule adapters all implement this one trait, which is what makes
//! a remote rule indistinguishable from a local one to the rest of the
//! linter.
//!
//! The [`strs`] module carries the naming-case helpers most style rules
//! share.

pub mod report;
pub mod rule;
pub mod severity;
pub mod strs;

pub use self::report::{Failure, Position};
pub use self::rule::{Rule, RuleError};
pub use self::severity::Severity;
