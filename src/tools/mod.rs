// src/tools/mod.rs

//! Locating optional third-party tools on the host.
//!
//! - [`fixed`] provides [`FixedToolLocator`], pinned locations from config or
//!   tests.
//! - [`system`] provides [`SystemToolLocator`], which probes the search path
//!   and runtime install roots.
//! - [`chained`] combines the two: pinned locations first, probing second.
//!
//! Absent tools are `Ok(None)` / an empty list. `Err` means the probe itself
//! failed and must be surfaced to the caller.

use std::fmt::{self, Debug};
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::Result;

pub mod chained;
pub mod fixed;
pub mod system;

pub use chained::ChainedToolLocator;
pub use fixed::FixedToolLocator;
pub use system::{SystemToolLocator, SystemToolLocatorOptions};

/// Tools the descriptor builder knows how to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tool {
    /// Build engine (`msbuild`).
    BuildTool,
    /// Version control client (`git`).
    Git,
    /// Test runner (`vstest.console`).
    TestRunner,
    /// Database command-line client (`sqlcmd`).
    DatabaseCli,
    /// The npm CLI entry script (`npm-cli.js`).
    NpmCli,
    /// Installed node runtime directories; may resolve to several entries.
    NodeRuntime,
    /// Global npm install prefix.
    NpmGlobalPrefix,
    Bower,
    Grunt,
    Gulp,
}

impl Tool {
    pub const ALL: [Tool; 10] = [
        Tool::BuildTool,
        Tool::Git,
        Tool::TestRunner,
        Tool::DatabaseCli,
        Tool::NpmCli,
        Tool::NodeRuntime,
        Tool::NpmGlobalPrefix,
        Tool::Bower,
        Tool::Grunt,
        Tool::Gulp,
    ];

    /// Name used in the `[tools]` config table.
    pub fn config_key(&self) -> &'static str {
        match self {
            Tool::BuildTool => "msbuild",
            Tool::Git => "git",
            Tool::TestRunner => "vstest",
            Tool::DatabaseCli => "sqlcmd",
            Tool::NpmCli => "npm_cli",
            Tool::NodeRuntime => "node_runtimes",
            Tool::NpmGlobalPrefix => "npm_global_prefix",
            Tool::Bower => "bower",
            Tool::Grunt => "grunt",
            Tool::Gulp => "gulp",
        }
    }

    /// Executable searched for on the host, for tools located that way.
    pub fn executable_name(&self) -> Option<&'static str> {
        match self {
            Tool::BuildTool => Some("msbuild"),
            Tool::Git => Some("git"),
            Tool::TestRunner => Some("vstest.console"),
            Tool::DatabaseCli => Some("sqlcmd"),
            Tool::Bower => Some("bower"),
            Tool::Grunt => Some("grunt"),
            Tool::Gulp => Some("gulp"),
            Tool::NpmCli | Tool::NodeRuntime | Tool::NpmGlobalPrefix => None,
        }
    }

    /// Whether a resolved location is itself a directory to put on the
    /// search path, rather than a file whose parent directory is.
    pub fn resolves_to_directory(&self) -> bool {
        matches!(self, Tool::NodeRuntime | Tool::NpmGlobalPrefix)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = s.trim();
        Tool::ALL
            .into_iter()
            .find(|tool| tool.config_key() == key)
            .ok_or_else(|| format!("unknown tool '{key}'"))
    }
}

/// Source of tool locations.
pub trait ToolLocator: Send + Sync + Debug {
    /// The primary location of `tool`, if installed.
    fn resolve(&self, tool: Tool) -> Result<Option<PathBuf>>;

    /// Every location of `tool`, in preference order.
    ///
    /// Only tool families such as [`Tool::NodeRuntime`] report more than one
    /// entry.
    fn resolve_all(&self, tool: Tool) -> Result<Vec<PathBuf>> {
        Ok(self.resolve(tool)?.into_iter().collect())
    }
}
