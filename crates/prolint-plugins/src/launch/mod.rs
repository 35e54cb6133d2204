//! Spawning plugin processes and validating their handshake.
//!
//! One [`PluginLauncher`] exists per configured plugin. Launching spawns
//! a single persistent child process for the remainder of the host run,
//! reads the plugin's handshake line, and validates protocol version,
//! service name, and shared secret before any RPC traffic is trusted.
//! Any failure here is fatal to the whole rule-collection step; nothing
//! is retried.

use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::sync::Arc;

use tracing::debug;

use crate::channel::{JsonlChannel, RuleSetChannel};
use crate::error::PluginError;
use crate::protocol::{Handshake, SECRET_ENV_KEY, SECRET_VALUE};

/// Tracing target for plugin launch operations.
const LAUNCH_TARGET: &str = "prolint_plugins::launch";

/// A validated plugin launch specification.
///
/// Parsed from one occurrence of the host's repeatable plugin flag. The
/// command string is split on whitespace into a program and its
/// arguments; no shell interpretation happens.
///
/// # Example
///
/// ```
/// use prolint_plugins::PluginLaunch;
///
/// let launch = PluginLaunch::parse("/usr/local/bin/my-plugin --strict")?;
/// assert_eq!(launch.program(), "/usr/local/bin/my-plugin");
/// assert_eq!(launch.args(), ["--strict"]);
/// # Ok::<(), prolint_plugins::PluginError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginLaunch {
    command: String,
    program: String,
    args: Vec<String>,
}

impl PluginLaunch {
    /// Parses a launch command string.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Launch`] when the command is empty or
    /// blank.
    pub fn parse(command: &str) -> Result<Self, PluginError> {
        let mut words = command.split_whitespace().map(str::to_owned);
        let Some(program) = words.next() else {
            return Err(PluginError::Launch {
                command: command.to_owned(),
                message: String::from("plugin command must not be empty"),
            });
        };
        Ok(Self {
            command: command.to_owned(),
            program,
            args: words.collect(),
        })
    }

    /// Returns the command string exactly as configured.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns the program to execute.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the arguments passed to the program.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Spawns one plugin process and performs the handshake.
#[derive(Debug, Clone)]
pub struct PluginLauncher {
    launch: PluginLaunch,
}

impl PluginLauncher {
    /// Creates a launcher from a validated launch spec.
    #[must_use]
    pub const fn new(launch: PluginLaunch) -> Self {
        Self { launch }
    }

    /// Spawns the plugin and validates its handshake.
    ///
    /// The child inherits the host's stderr so plugin logs surface
    /// directly; stdin and stdout carry the protocol. The shared secret
    /// travels to the child through the environment.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Spawn`] when the process cannot start,
    /// [`PluginError::Io`] when the handshake line cannot be read, and
    /// [`PluginError::Handshake`] when the line is missing, malformed,
    /// or mismatched.
    pub fn launch(&self) -> Result<JsonlChannel, PluginError> {
        let name = self.launch.program().to_owned();

        debug!(
            target: LAUNCH_TARGET,
            plugin = %name,
            command = self.launch.command(),
            "spawning plugin process"
        );

        let mut child = Command::new(self.launch.program())
            .args(self.launch.args())
            .env(SECRET_ENV_KEY, SECRET_VALUE)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| PluginError::Spawn {
                command: self.launch.command().to_owned(),
                source: Arc::new(source),
            })?;

        let stdin = child.stdin.take().ok_or_else(|| PluginError::Handshake {
            name: name.clone(),
            message: String::from("failed to capture plugin stdin"),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| PluginError::Handshake {
            name: name.clone(),
            message: String::from("failed to capture plugin stdout"),
        })?;

        let mut reader = BufReader::new(stdout);
        let handshake = read_handshake(&name, &mut reader)?;
        if let Some(message) = handshake.mismatch() {
            return Err(PluginError::Handshake { name, message });
        }

        debug!(
            target: LAUNCH_TARGET,
            plugin = %name,
            version = handshake.protocol_version,
            "plugin handshake accepted"
        );

        Ok(JsonlChannel::new(name, child, stdin, reader))
    }
}

/// Reads and decodes the single handshake line.
fn read_handshake(
    name: &str,
    reader: &mut impl BufRead,
) -> Result<Handshake, PluginError> {
    let mut line = String::new();
    let bytes_read = reader.read_line(&mut line).map_err(|source| PluginError::Io {
        name: name.to_owned(),
        source: Arc::new(source),
    })?;
    if bytes_read == 0 {
        return Err(PluginError::Handshake {
            name: name.to_owned(),
            message: String::from("plugin exited before writing a handshake"),
        });
    }
    serde_json::from_str(line.trim()).map_err(|err| PluginError::Handshake {
        name: name.to_owned(),
        message: format!("malformed handshake line: {err}"),
    })
}

/// Launches every configured plugin, strictly in configuration order.
///
/// The returned channels preserve the input order, which is what keeps
/// the merged rule list grouped by plugin. The first failure aborts the
/// whole collection step.
///
/// # Errors
///
/// Returns the first launch or handshake error encountered.
pub fn launch_all(
    launches: &[PluginLaunch],
) -> Result<Vec<Arc<dyn RuleSetChannel>>, PluginError> {
    let mut channels: Vec<Arc<dyn RuleSetChannel>> = Vec::with_capacity(launches.len());
    for launch in launches {
        let channel = PluginLauncher::new(launch.clone()).launch()?;
        channels.push(Arc::new(channel));
    }
    Ok(channels)
}
