// src/environment.rs

//! Host layout the descriptor defaults are computed from.
//!
//! Everything here is explicit input. In particular the inherited search path
//! is carried as data instead of being read from the current process, so the
//! factory stays deterministic for a given `HostEnvironment`.

use std::path::{Path, PathBuf};

use crate::errors::{DeployEnvError, Result};
use crate::types::Bitness;

/// Process variable the CLI consults when the config leaves bitness unset.
pub const SITE_BITNESS_VAR: &str = "SITE_BITNESS";

#[derive(Debug, Clone)]
pub struct HostEnvironment {
    /// Site root; exported as the home directory of launched tools.
    pub root_path: PathBuf,
    /// Directory the deployed site is served from.
    pub web_root_path: PathBuf,
    /// Directory holding the deployment scripts (`starter.cmd`, `nuget.exe`, ...).
    ///
    /// `None` means the host is not set up for deployments; any build that
    /// needs it fails with `ConfigurationMissing`.
    pub script_path: Option<PathBuf>,
    /// Directory holding per-site deployment tools (post-deployment actions).
    pub deployment_tools_path: PathBuf,
    /// Search path inherited by launched processes, before tool directories
    /// are prepended.
    pub inherited_path: Option<String>,
    /// Configured site bitness (e.g. `AMD64`), if any.
    pub site_bitness: Option<String>,
    /// Bitness of the process building descriptors.
    pub process_bitness: Bitness,
}

impl HostEnvironment {
    pub fn new(root_path: impl Into<PathBuf>, web_root_path: impl Into<PathBuf>) -> Self {
        let root_path = root_path.into();
        let deployment_tools_path = root_path.join("deployments").join("tools");
        Self {
            root_path,
            web_root_path: web_root_path.into(),
            script_path: None,
            deployment_tools_path,
            inherited_path: None,
            site_bitness: None,
            process_bitness: Bitness::of_current_process(),
        }
    }

    /// The script directory, or `ConfigurationMissing` if it was never set.
    pub fn require_script_path(&self) -> Result<&Path> {
        match self.script_path.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => Ok(path),
            _ => Err(DeployEnvError::ConfigurationMissing(
                "deployment script directory is not configured".to_string(),
            )),
        }
    }

    pub fn bitness(&self) -> Bitness {
        Bitness::from_site_bitness(self.site_bitness.as_deref(), self.process_bitness)
    }
}
