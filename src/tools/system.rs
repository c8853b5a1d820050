// src/tools/system.rs

//! Tool discovery on the running host.
//!
//! Executables are looked up with `which` against an explicit search path
//! (the one launched processes will inherit), never the ambient `PATH` of the
//! current process. Runtime installations are discovered by listing the
//! configured install roots through the [`FileSystem`] abstraction, so tests
//! can describe a host layout with [`crate::fs::mock::MockFileSystem`].

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;
use tracing::{debug, trace};

use crate::errors::{DeployEnvError, Result};
use crate::fs::FileSystem;
use crate::tools::{Tool, ToolLocator};

const RESOLVER: &str = "tool locator";

/// Runtime install directories are named after the version they contain,
/// optionally prefixed with `v` (e.g. `18.19.0`, `v20.11.1`).
static RUNTIME_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v?(\d+)\.(\d+)\.(\d+)$").expect("valid version regex"));

/// Where and how to probe.
#[derive(Debug, Clone, Default)]
pub struct SystemToolLocatorOptions {
    /// Search path used to find executables.
    pub search_path: Option<String>,
    /// Directory relative search path entries are resolved against.
    pub cwd: PathBuf,
    /// Directories whose children are node runtime installations.
    pub runtime_roots: Vec<PathBuf>,
    /// Glob patterns a runtime directory name must match. Empty means `*`.
    pub runtime_patterns: Vec<String>,
    /// Global npm prefix, reported only if it exists.
    pub npm_global_prefix: Option<PathBuf>,
}

#[derive(Debug)]
pub struct SystemToolLocator<F: FileSystem> {
    fs: F,
    options: SystemToolLocatorOptions,
    runtime_matcher: GlobSet,
}

impl<F: FileSystem> SystemToolLocator<F> {
    pub fn new(fs: F, options: SystemToolLocatorOptions) -> Result<Self> {
        let runtime_matcher = build_runtime_matcher(&options.runtime_patterns)?;
        Ok(Self {
            fs,
            options,
            runtime_matcher,
        })
    }

    fn find_executable(&self, name: &str) -> Result<Option<PathBuf>> {
        let Some(search_path) = self.options.search_path.as_deref() else {
            return Ok(None);
        };

        match which::which_in(name, Some(search_path), &self.options.cwd) {
            Ok(path) => {
                debug!(tool = name, path = %path.display(), "located executable");
                Ok(Some(path))
            }
            Err(which::Error::CannotFindBinaryPath) => {
                trace!(tool = name, "executable not found on search path");
                Ok(None)
            }
            Err(e) => Err(DeployEnvError::resolver_failure(
                RESOLVER,
                format!("looking up '{name}': {e}"),
            )),
        }
    }

    /// `npm-cli.js` ships next to the `npm` shim: under `lib/node_modules`
    /// on Unix layouts and directly under `node_modules` on Windows layouts.
    ///
    /// `which` always looks at the real disk, so the script is checked there
    /// too rather than through `self.fs`; both halves must see the same host.
    fn find_npm_cli(&self) -> Result<Option<PathBuf>> {
        let Some(npm) = self.find_executable("npm")? else {
            return Ok(None);
        };
        let Some(bin_dir) = npm.parent() else {
            return Ok(None);
        };

        let script = Path::new("npm").join("bin").join("npm-cli.js");
        let mut candidates = Vec::new();
        if let Some(prefix) = bin_dir.parent() {
            candidates.push(prefix.join("lib").join("node_modules").join(&script));
        }
        candidates.push(bin_dir.join("node_modules").join(&script));

        Ok(candidates.into_iter().find(|c| c.is_file()))
    }

    fn find_runtimes(&self) -> Result<Vec<PathBuf>> {
        let mut found: Vec<((u64, u64, u64), PathBuf)> = Vec::new();

        for root in &self.options.runtime_roots {
            if !self.fs.is_dir(root) {
                trace!(root = %root.display(), "runtime root does not exist");
                continue;
            }

            let entries = self.fs.subdirectories(root).map_err(|e| {
                DeployEnvError::resolver_failure(RESOLVER, format!("{e:#}"))
            })?;

            for entry in entries {
                let Some(name) = entry.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                if !self.runtime_matcher.is_match(name) {
                    continue;
                }
                let Some(version) = parse_runtime_version(name) else {
                    continue;
                };

                let bin = entry.join("bin");
                let dir = if self.fs.is_dir(&bin) { bin } else { entry };
                found.push((version, dir));
            }
        }

        // Newest first; ties keep root order, then name order.
        found.sort_by(|a, b| b.0.cmp(&a.0));
        debug!(count = found.len(), "discovered node runtimes");
        Ok(found.into_iter().map(|(_, dir)| dir).collect())
    }
}

impl<F: FileSystem> ToolLocator for SystemToolLocator<F> {
    fn resolve(&self, tool: Tool) -> Result<Option<PathBuf>> {
        match tool {
            Tool::NpmCli => self.find_npm_cli(),
            Tool::NodeRuntime => Ok(self.find_runtimes()?.into_iter().next()),
            Tool::NpmGlobalPrefix => Ok(self
                .options
                .npm_global_prefix
                .as_ref()
                .filter(|prefix| self.fs.is_dir(prefix))
                .cloned()),
            other => match other.executable_name() {
                Some(name) => self.find_executable(name),
                None => Ok(None),
            },
        }
    }

    fn resolve_all(&self, tool: Tool) -> Result<Vec<PathBuf>> {
        match tool {
            Tool::NodeRuntime => self.find_runtimes(),
            other => Ok(self.resolve(other)?.into_iter().collect()),
        }
    }
}

fn build_runtime_matcher(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    if patterns.is_empty() {
        builder.add(glob("*")?);
    }
    for pattern in patterns {
        builder.add(glob(pattern)?);
    }
    builder
        .build()
        .map_err(|e| DeployEnvError::ConfigError(format!("building runtime patterns: {e}")))
}

fn glob(pattern: &str) -> Result<Glob> {
    Glob::new(pattern).map_err(|e| {
        DeployEnvError::ConfigError(format!("invalid runtime pattern '{pattern}': {e}"))
    })
}

fn parse_runtime_version(name: &str) -> Option<(u64, u64, u64)> {
    let caps = RUNTIME_VERSION.captures(name)?;
    let part = |i: usize| caps.get(i)?.as_str().parse::<u64>().ok();
    Some((part(1)?, part(2)?, part(3)?))
}
