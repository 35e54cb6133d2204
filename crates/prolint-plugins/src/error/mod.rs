//! Domain errors raised by plugin operations.
//!
//! All errors use `thiserror`-derived enums with structured context so
//! callers can inspect the failure programmatically. I/O errors are
//! wrapped in `Arc` to keep the enum clonable across retry-free call
//! sites and to satisfy the `result_large_err` Clippy lint.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors arising from plugin launch and remote rule calls.
///
/// The first six variants are transport failures: any of them during
/// rule collection aborts the whole collection step. `Remote` carries a
/// call error the plugin itself reported (an unknown rule id, a parse
/// failure) and `PathResolution` is raised locally before any remote
/// call is issued.
#[derive(Debug, Clone, Error)]
pub enum PluginError {
    /// The launch command was malformed.
    #[error("invalid plugin command '{command}': {message}")]
    Launch {
        /// The configured command string.
        command: String,
        /// Description of the validation failure.
        message: String,
    },

    /// The plugin process could not be spawned.
    #[error("plugin '{command}' failed to start: {source}")]
    Spawn {
        /// The configured command string.
        command: String,
        /// Underlying spawn error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The handshake line was missing, malformed, or mismatched.
    #[error("plugin '{name}' handshake failed: {message}")]
    Handshake {
        /// Plugin name (the launch command's program).
        name: String,
        /// Description of the mismatch.
        message: String,
    },

    /// An I/O error occurred while talking to the plugin process.
    #[error("I/O error communicating with plugin '{name}': {source}")]
    Io {
        /// Plugin name.
        name: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A request could not be serialised to JSON.
    #[error("failed to serialise plugin request: {0}")]
    EncodeRequest(#[source] Arc<serde_json::Error>),

    /// A response line could not be deserialised from JSON.
    #[error("failed to deserialise response from plugin '{name}': {message}")]
    DecodeResponse {
        /// Plugin name.
        name: String,
        /// Description of the parse failure.
        message: String,
    },

    /// The plugin answered with a reply that violates the protocol.
    #[error("plugin '{name}' wrote invalid output: {message}")]
    Protocol {
        /// Plugin name.
        name: String,
        /// Description of the protocol violation.
        message: String,
    },

    /// The plugin reported a call error.
    #[error("plugin '{name}' call failed: {message}")]
    Remote {
        /// Plugin name.
        name: String,
        /// The error message the plugin returned.
        message: String,
    },

    /// A target path could not be resolved to an absolute path.
    #[error("failed to resolve absolute path for '{}': {source}", path.display())]
    PathResolution {
        /// The path that failed to resolve.
        path: PathBuf,
        /// Underlying resolution error.
        #[source]
        source: Arc<std::io::Error>,
    },
}
