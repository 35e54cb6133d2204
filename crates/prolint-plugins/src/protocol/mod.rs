//! Wire contract shared by the host and plugin processes.
//!
//! The protocol is a line-oriented JSON exchange over the plugin's
//! standard I/O. After the plugin writes one [`Handshake`] line, the host
//! writes one [`RuleSetRequest`] per line and reads one
//! [`RuleSetResponse`] per line, strictly in turn. The schema is
//! versioned by [`PROTOCOL_VERSION`] alone and is deliberately
//! independent of the host's internal rule abstractions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use prolint_rule::Severity;
use prolint_syntax::Position;

/// The protocol revision spoken over plugin connections.
pub const PROTOCOL_VERSION: u32 = 1;

/// Environment variable carrying the shared handshake secret.
///
/// The host sets it when spawning a plugin; a plugin binary invoked
/// without it knows it is not being run by a host and refuses to serve.
pub const SECRET_ENV_KEY: &str = "PROLINT_PLUGIN";

/// The shared secret a plugin must echo in its handshake line.
pub const SECRET_VALUE: &str = "ruleset";

/// The single service a plugin dispenses.
pub const SERVICE_NAME: &str = "ruleset";

/// The first line a plugin writes on stdout, before any RPC traffic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handshake {
    /// The protocol revision the plugin was built against.
    pub protocol_version: u32,
    /// The service the plugin dispenses.
    pub service: String,
    /// Echo of the shared secret received through the environment.
    pub secret: String,
}

impl Handshake {
    /// Returns the handshake the current build emits and expects.
    #[must_use]
    pub fn current() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            service: SERVICE_NAME.to_owned(),
            secret: SECRET_VALUE.to_owned(),
        }
    }

    /// Returns a description of the first mismatched field, if any.
    #[must_use]
    pub fn mismatch(&self) -> Option<String> {
        if self.protocol_version != PROTOCOL_VERSION {
            return Some(format!(
                "protocol version {} does not match expected {PROTOCOL_VERSION}",
                self.protocol_version
            ));
        }
        if self.service != SERVICE_NAME {
            return Some(format!(
                "service '{}' does not match expected '{SERVICE_NAME}'",
                self.service
            ));
        }
        if self.secret != SECRET_VALUE {
            return Some(String::from("shared secret does not match"));
        }
        None
    }
}

/// Host flags propagated to the plugin before rule construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListRulesRequest {
    /// Whether the host runs with verbose output.
    pub verbose: bool,
    /// Whether the host runs in fix mode.
    pub fix_mode: bool,
}

/// A request to apply one rule to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyRequest {
    /// The rule id, as returned by the latest listing.
    pub id: String,
    /// Absolute path of the target file.
    pub path: PathBuf,
}

/// Rule metadata as declared by a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMeta {
    /// The stable rule id.
    pub id: String,
    /// Human-readable description of the rule.
    pub purpose: String,
    /// Declared severity; absent values decode as unknown.
    #[serde(default)]
    pub severity: WireSeverity,
}

/// Severity as carried on the wire.
///
/// Decoding is total: any enumerant this build does not know, including
/// an absent field, becomes [`WireSeverity::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WireSeverity {
    /// A blocking violation.
    Error,
    /// A non-blocking violation.
    Warning,
    /// An informational finding.
    Note,
    /// Anything this build does not recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

impl WireSeverity {
    /// Maps the wire value onto the host severity, failing closed.
    ///
    /// Unrecognised values are treated as maximally blocking rather than
    /// silently downgraded or dropped.
    #[must_use]
    pub const fn to_severity(self) -> Severity {
        match self {
            Self::Warning => Severity::Warning,
            Self::Note => Severity::Note,
            Self::Error | Self::Unknown => Severity::Error,
        }
    }
}

impl From<Severity> for WireSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => Self::Error,
            Severity::Warning => Self::Warning,
            Severity::Note => Self::Note,
        }
    }
}

/// A source position as carried on the wire.
///
/// Fields are copied verbatim across the process boundary; neither side
/// reinterprets offsets, lines, or columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WirePosition {
    /// 0-based byte offset.
    pub offset: i64,
    /// 1-based line number.
    pub line: i64,
    /// 1-based column number.
    pub column: i64,
}

impl WirePosition {
    /// Builds a wire position from a parser position.
    #[must_use]
    pub fn from_position(pos: Position) -> Self {
        Self {
            offset: i64::try_from(pos.offset).unwrap_or(i64::MAX),
            line: i64::try_from(pos.line).unwrap_or(i64::MAX),
            column: i64::try_from(pos.column).unwrap_or(i64::MAX),
        }
    }

    /// Rebuilds a parser position from a wire position.
    #[must_use]
    pub fn to_position(self) -> Position {
        Position::new(
            usize::try_from(self.offset).unwrap_or(0),
            usize::try_from(self.line).unwrap_or(0),
            usize::try_from(self.column).unwrap_or(0),
        )
    }
}

/// A rule violation as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireFailure {
    /// The violation message.
    pub message: String,
    /// Where the violation was found.
    pub pos: WirePosition,
}

/// One request line from host to plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum RuleSetRequest {
    /// List the rules the plugin serves, resolving generators first.
    ListRules(ListRulesRequest),
    /// Apply one rule to one file.
    Apply(ApplyRequest),
}

/// One response line from plugin to host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum RuleSetResponse {
    /// Successful `list_rules` reply.
    Rules {
        /// The declared rules, in no particular order.
        rules: Vec<RuleMeta>,
    },
    /// Successful `apply` reply.
    Failures {
        /// The violations found, possibly empty.
        failures: Vec<WireFailure>,
    },
    /// The call failed plugin-side.
    Error {
        /// The plugin's description of the failure.
        message: String,
    },
}
