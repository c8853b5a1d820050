// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `deployenv`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "deployenv",
    version,
    about = "Build launch descriptors for deployment tooling.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Deployenv.toml` in the current working directory.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, the `DEPLOYENV_LOG` filter or `info` is used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Print JSON instead of the human-readable summary.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Describe an arbitrary external command.
    Generic {
        /// Program to launch.
        #[arg(long, value_name = "PATH")]
        command: String,

        /// Directory the program starts in.
        #[arg(long, value_name = "DIR")]
        cwd: String,

        /// Idle timeout in seconds; defaults to the configured command idle
        /// timeout.
        #[arg(long, value_name = "SECS")]
        idle_timeout: Option<u64>,
    },

    /// Describe the deployment starter script.
    Starter {
        /// Directory the script starts in.
        #[arg(long, value_name = "DIR")]
        cwd: String,

        /// Directory the deployment reads from.
        #[arg(long, value_name = "DIR")]
        source: String,

        /// Directory the deployment writes to.
        #[arg(long, value_name = "DIR")]
        target: String,
    },

    /// Map a provider webhook payload (JSON file) to a deployment request.
    Payload {
        #[arg(value_name = "FILE")]
        file: String,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Same level as an `EnvFilter` directive.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
