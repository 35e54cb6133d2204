//! Out-of-process rule plugins for the prolint linter.
//!
//! This crate implements the host side of the plugin protocol: it spawns
//! one persistent child process per configured plugin, validates a
//! version/secret handshake, and exchanges single-line JSON requests and
//! responses over the child's standard I/O. The two operations of the
//! wire contract, `list_rules` and `apply`, are deliberately minimal and
//! versioned independently of the host's internal `Rule` trait so plugin
//! binaries stay compatible while internal abstractions evolve.
//!
//! Every rule a plugin declares is wrapped in an [`ExternalRule`]
//! adapter implementing the local [`prolint_rule::Rule`] capability,
//! which makes remote rules indistinguishable from built-ins to the rest
//! of the linter.
//!
//! # Architecture
//!
//! A [`PluginLaunch`] describes how to start one plugin process. The
//! [`PluginLauncher`] spawns the child and performs the handshake,
//! yielding a [`JsonlChannel`] which holds both pipe halves behind one
//! lock so at most one request/response exchange is ever in flight per
//! connection. [`external_rules`] drives `list_rules` over an ordered
//! list of channels and adapts every declared rule.
//!
//! # Example
//!
//! ```rust,no_run
//! use prolint_plugins::{PluginLaunch, PluginLauncher, RuleSetChannel, external_rules};
//! use std::sync::Arc;
//!
//! let launch = PluginLaunch::parse("/usr/local/bin/my-plugin --strict")?;
//! let channels: Vec<Arc<dyn RuleSetChannel>> =
//!     vec![Arc::new(PluginLauncher::new(launch).launch()?)];
//! let rules = external_rules(&channels, false, false)?;
//! # Ok::<(), prolint_plugins::PluginError>(())
//! ```

pub mod channel;
pub mod error;
pub mod external;
pub mod launch;
pub mod protocol;
pub mod provider;

pub use self::channel::{JsonlChannel, RuleSetChannel};
pub use self::error::PluginError;
pub use self::external::ExternalRule;
pub use self::launch::{PluginLaunch, PluginLauncher, launch_all};
pub use self::protocol::{
    ApplyRequest, Handshake, ListRulesRequest, PROTOCOL_VERSION, RuleMeta, RuleSetRequest,
    RuleSetResponse, SECRET_ENV_KEY, SECRET_VALUE, SERVICE_NAME, WireFailure, WirePosition,
    WireSeverity,
};
pub use self::provider::external_rules;
