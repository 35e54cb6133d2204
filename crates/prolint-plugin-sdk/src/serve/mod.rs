//! The plugin's connection loop.
//!
//! A plugin process writes one handshake line on startup, then serves
//! decoded requests one line at a time until its stdin closes. The loop
//! is synchronous by construction: one request is read, dispatched, and
//! answered before the next is read, which is what the host's channel
//! lock assumes.

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::debug;

use prolint_plugins::protocol::{
    Handshake, RuleSetRequest, RuleSetResponse, SECRET_ENV_KEY, SECRET_VALUE,
};

use crate::registry::{ProtoParse, RuleSetRegistry};

/// Tracing target for the serve loop.
const SERVE_TARGET: &str = "prolint_plugin_sdk::serve";

/// Errors terminating a plugin's serve loop.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The process was started without the host's shared secret.
    #[error(
        "this binary is a prolint plugin and is not meant to be executed directly; \
         configure it through the host's plugin flag"
    )]
    NotInvokedByHost,

    /// Reading or writing the connection failed.
    #[error("I/O error on the plugin connection: {0}")]
    Io(#[from] std::io::Error),

    /// A response could not be serialised.
    #[error("failed to serialise a response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Serves the registry over the process's standard I/O.
///
/// Refuses to run when the shared-secret environment variable is absent
/// or wrong, which is the tell-tale of a direct invocation.
///
/// # Errors
///
/// Returns [`ServeError::NotInvokedByHost`] on a direct invocation, or
/// any I/O or serialisation error from the connection.
pub fn serve<P: ProtoParse>(registry: &RuleSetRegistry<P>) -> Result<(), ServeError> {
    if std::env::var(SECRET_ENV_KEY).as_deref() != Ok(SECRET_VALUE) {
        return Err(ServeError::NotInvokedByHost);
    }
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    serve_connection(registry, stdin, stdout)
}

/// Serves the registry over an explicit connection.
///
/// Writes the handshake line first, then answers one request per line
/// until the reader reaches end of input. A line that does not decode as
/// a request produces an `error` reply and the loop continues.
///
/// # Errors
///
/// Returns any I/O or serialisation error from the connection.
pub fn serve_connection<P: ProtoParse>(
    registry: &RuleSetRegistry<P>,
    reader: impl BufRead,
    mut writer: impl Write,
) -> Result<(), ServeError> {
    let handshake = serde_json::to_string(&Handshake::current())?;
    writer.write_all(handshake.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    for next_line in reader.lines() {
        let line = next_line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<RuleSetRequest>(&line) {
            Ok(request) => {
                debug!(target: SERVE_TARGET, "dispatching request");
                registry.dispatch(&request)
            }
            Err(err) => RuleSetResponse::Error {
                message: format!("malformed request: {err}"),
            },
        };
        let encoded = serde_json::to_string(&response)?;
        writer.write_all(encoded.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    debug!(target: SERVE_TARGET, "connection closed, shutting down");
    Ok(())
}
