//! CLI argument definitions for the prolint linter.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line interface for the prolint proto linter.
#[derive(Parser, Debug)]
#[command(name = "prolint", version, about = "A pluggable linter for Protocol Buffer files")]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Structured subcommands for the prolint CLI.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lints proto files with built-in and plugin rules.
    Lint {
        /// Proto files to lint.
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Command starting one plugin process. Repeatable; plugins
        /// launch and contribute rules in the order given.
        #[arg(long = "plugin", value_name = "COMMAND")]
        plugins: Vec<String>,

        /// Enables verbose output; also propagated to plugins.
        #[arg(short = 'v', long)]
        verbose: bool,

        /// Runs in fix mode; propagated to plugins. The host itself
        /// performs no rewriting.
        #[arg(long)]
        fix: bool,
    },
    /// Lists the built-in rules.
    List,
}
