//! The synchronous rule-set channel between host and plugin.
//!
//! The contract is exactly two blocking operations, `list_rules` and
//! `apply`. There is no streaming, no timeout, and no retry: a call
//! blocks the calling thread until the plugin answers or the transport
//! fails, and cancellation only ever happens by dropping the channel,
//! which tears the plugin process down.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::error::PluginError;
use crate::protocol::{
    ApplyRequest, ListRulesRequest, RuleMeta, RuleSetRequest, RuleSetResponse, WireFailure,
};

/// Tracing target for channel traffic.
const CHANNEL_TARGET: &str = "prolint_plugins::channel";

/// The two synchronous operations a plugin serves.
///
/// The host consumes this trait only; tests substitute in-process
/// implementations to exercise adapters without spawning processes.
pub trait RuleSetChannel: std::fmt::Debug + Send + Sync {
    /// Asks the plugin to resolve and list its rules.
    ///
    /// # Errors
    ///
    /// Returns a [`PluginError`] on transport failure or when the plugin
    /// reports a call error.
    fn list_rules(&self, request: &ListRulesRequest) -> Result<Vec<RuleMeta>, PluginError>;

    /// Asks the plugin to apply one rule to one file.
    ///
    /// # Errors
    ///
    /// Returns a [`PluginError`] on transport failure or when the plugin
    /// reports a call error, such as an unknown rule id or a parse
    /// failure.
    fn apply(&self, request: &ApplyRequest) -> Result<Vec<WireFailure>, PluginError>;
}

/// A connected, long-lived channel to one plugin process.
///
/// Both pipe halves live behind a single mutex, so at most one
/// request/response exchange is in flight per connection; concurrent
/// callers serialise instead of interleaving lines. Dropping the channel
/// kills and reaps the child process.
pub struct JsonlChannel {
    name: String,
    inner: Mutex<ChannelIo>,
}

struct ChannelIo {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
}

impl JsonlChannel {
    pub(crate) fn new(
        name: String,
        child: Child,
        stdin: ChildStdin,
        reader: BufReader<ChildStdout>,
    ) -> Self {
        Self {
            name,
            inner: Mutex::new(ChannelIo {
                child,
                stdin,
                reader,
            }),
        }
    }

    /// Returns the plugin name this channel is connected to.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, request: &RuleSetRequest) -> Result<RuleSetResponse, PluginError> {
        let json = serde_json::to_string(request)
            .map_err(|err| PluginError::EncodeRequest(std::sync::Arc::new(err)))?;

        let mut io = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        debug!(
            target: CHANNEL_TARGET,
            plugin = %self.name,
            request_bytes = json.len(),
            "writing request to plugin stdin"
        );

        io.stdin
            .write_all(json.as_bytes())
            .map_err(|source| self.io_error(source))?;
        io.stdin
            .write_all(b"\n")
            .map_err(|source| self.io_error(source))?;
        io.stdin.flush().map_err(|source| self.io_error(source))?;

        let mut line = String::new();
        let bytes_read = io
            .reader
            .read_line(&mut line)
            .map_err(|source| self.io_error(source))?;
        if bytes_read == 0 {
            return Err(PluginError::Protocol {
                name: self.name.clone(),
                message: String::from("connection closed before a response arrived"),
            });
        }

        debug!(
            target: CHANNEL_TARGET,
            plugin = %self.name,
            response_bytes = bytes_read,
            "read response from plugin stdout"
        );

        serde_json::from_str(line.trim()).map_err(|err| PluginError::DecodeResponse {
            name: self.name.clone(),
            message: err.to_string(),
        })
    }

    fn io_error(&self, source: std::io::Error) -> PluginError {
        PluginError::Io {
            name: self.name.clone(),
            source: std::sync::Arc::new(source),
        }
    }

    fn unexpected_reply(&self, expected: &str, got: &RuleSetResponse) -> PluginError {
        let kind = match got {
            RuleSetResponse::Rules { .. } => "rules",
            RuleSetResponse::Failures { .. } => "failures",
            RuleSetResponse::Error { .. } => "error",
        };
        PluginError::Protocol {
            name: self.name.clone(),
            message: format!("expected a '{expected}' reply, got '{kind}'"),
        }
    }
}

impl RuleSetChannel for JsonlChannel {
    fn list_rules(&self, request: &ListRulesRequest) -> Result<Vec<RuleMeta>, PluginError> {
        let response = self.call(&RuleSetRequest::ListRules(*request))?;
        match response {
            RuleSetResponse::Rules { rules } => Ok(rules),
            RuleSetResponse::Error { message } => Err(PluginError::Remote {
                name: self.name.clone(),
                message,
            }),
            RuleSetResponse::Failures { .. } => Err(self.unexpected_reply("rules", &response)),
        }
    }

    fn apply(&self, request: &ApplyRequest) -> Result<Vec<WireFailure>, PluginError> {
        let response = self.call(&RuleSetRequest::Apply(request.clone()))?;
        match response {
            RuleSetResponse::Failures { failures } => Ok(failures),
            RuleSetResponse::Error { message } => Err(PluginError::Remote {
                name: self.name.clone(),
                message,
            }),
            RuleSetResponse::Rules { .. } => Err(self.unexpected_reply("failures", &response)),
        }
    }
}

impl Drop for JsonlChannel {
    fn drop(&mut self) {
        let io = self
            .inner
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        debug!(
            target: CHANNEL_TARGET,
            plugin = %self.name,
            "shutting down plugin process"
        );
        drop(io.child.kill());
        drop(io.child.wait());
    }
}

impl std::fmt::Debug for JsonlChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonlChannel")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
