// src/settings/mod.rs

//! User-facing deployment settings.
//!
//! The factory only talks to a [`SettingsProvider`]; where the values live
//! (a TOML file, an in-memory map in tests) is up to the implementation.
//!
//! - [`keys`] holds the setting names the crate itself interprets.
//! - [`deployment`] provides [`DeploymentSettings`], the map-backed provider
//!   used by the CLI and the tests.

use std::fmt::Debug;
use std::time::Duration;

use crate::errors::Result;

pub mod deployment;
pub mod keys;

pub use deployment::DeploymentSettings;

/// Read-only source of user overrides.
///
/// Implementations must report an unset key as `Ok(None)`; `Err` is reserved
/// for genuine failures of the backing store and is never treated as "unset"
/// by callers.
pub trait SettingsProvider: Send + Sync + Debug {
    /// The user value for `key`, if any.
    fn get_value(&self, key: &str) -> Result<Option<String>>;

    /// Idle timeout handed to the process supervisor for deployment commands.
    fn idle_timeout(&self) -> Result<Duration>;

    /// Directory holding post-deployment actions, falling back to `default`.
    fn post_deployment_actions_dir(&self, default: &str) -> Result<String>;

    /// Every configured setting, exported as-is into launched processes.
    fn all_values(&self) -> Result<Vec<(String, String)>>;
}
