// src/config/model.rs

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::environment::HostEnvironment;
use crate::settings::DeploymentSettings;
use crate::tools::{FixedToolLocator, SystemToolLocatorOptions, Tool};

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [environment]
/// root_path = "/home/site"
/// script_path = "/opt/deployenv/scripts"
///
/// [settings]
/// project = "src/web"
/// SCM_COMMAND_IDLE_TIMEOUT = 120
///
/// [tools]
/// git = "/usr/bin/git"
/// node_runtimes = ["/opt/nodejs/20.11.1/bin", "/opt/nodejs/18.19.0/bin"]
///
/// [locator]
/// runtime_roots = ["/opt/nodejs"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    pub environment: EnvironmentSection,

    /// Free-form user settings; every entry is also exported to launched
    /// processes.
    #[serde(default)]
    pub settings: BTreeMap<String, SettingValue>,

    /// Pinned tool locations, keyed by tool name (see `Tool::config_key`).
    #[serde(default)]
    pub tools: BTreeMap<String, ToolLocation>,

    #[serde(default)]
    pub locator: LocatorSection,
}

/// `[environment]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentSection {
    pub root_path: String,

    /// Defaults to `<root_path>/wwwroot`.
    #[serde(default)]
    pub web_root_path: Option<String>,

    /// Directory holding the deployment scripts. Required to build any
    /// descriptor, but checked when building rather than when loading so that
    /// payload parsing works on hosts without scripts.
    #[serde(default)]
    pub script_path: Option<String>,

    /// Defaults to `<root_path>/deployments/tools`.
    #[serde(default)]
    pub deployment_tools_path: Option<String>,

    /// e.g. `"AMD64"`; unset means "same as this process".
    #[serde(default)]
    pub site_bitness: Option<String>,
}

/// `[locator]` section: how to probe the host for tools that are not pinned.
#[derive(Debug, Clone, Deserialize)]
pub struct LocatorSection {
    /// Probe the search path and runtime roots at all.
    #[serde(default = "default_probe_system")]
    pub probe_system: bool,

    #[serde(default)]
    pub runtime_roots: Vec<String>,

    /// Globs matched against runtime directory names.
    #[serde(default)]
    pub runtime_patterns: Vec<String>,

    #[serde(default)]
    pub npm_global_prefix: Option<String>,
}

fn default_probe_system() -> bool {
    true
}

impl Default for LocatorSection {
    fn default() -> Self {
        Self {
            probe_system: default_probe_system(),
            runtime_roots: Vec::new(),
            runtime_patterns: Vec::new(),
            npm_global_prefix: None,
        }
    }
}

/// A setting value; TOML scalars are accepted and exported as strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Text(String),
    Integer(i64),
    Bool(bool),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Text(s) => f.write_str(s),
            SettingValue::Integer(i) => write!(f, "{i}"),
            SettingValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// One pinned location, or several for tool families.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ToolLocation {
    One(String),
    Many(Vec<String>),
}

impl ToolLocation {
    pub fn paths(&self) -> Vec<&str> {
        match self {
            ToolLocation::One(path) => vec![path.as_str()],
            ToolLocation::Many(paths) => paths.iter().map(String::as_str).collect(),
        }
    }
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub environment: EnvironmentSection,
    pub settings: BTreeMap<String, String>,
    pub tools: BTreeMap<Tool, Vec<PathBuf>>,
    pub locator: LocatorSection,
}

impl ConfigFile {
    /// Assemble without validation; use `ConfigFile::try_from(raw)` instead.
    pub(crate) fn new_unchecked(
        environment: EnvironmentSection,
        settings: BTreeMap<String, String>,
        tools: BTreeMap<Tool, Vec<PathBuf>>,
        locator: LocatorSection,
    ) -> Self {
        Self {
            environment,
            settings,
            tools,
            locator,
        }
    }

    /// Host layout, with `inherited_path` as the search path launched
    /// processes start from.
    pub fn host_environment(&self, inherited_path: Option<String>) -> HostEnvironment {
        let env = &self.environment;
        let root = PathBuf::from(&env.root_path);

        let mut host = HostEnvironment::new(
            &root,
            env.web_root_path
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or_else(|| root.join("wwwroot")),
        );
        if let Some(tools_path) = &env.deployment_tools_path {
            host.deployment_tools_path = PathBuf::from(tools_path);
        }
        host.script_path = env.script_path.as_ref().map(PathBuf::from);
        host.site_bitness = env.site_bitness.clone();
        host.inherited_path = inherited_path;
        host
    }

    pub fn deployment_settings(&self) -> DeploymentSettings {
        DeploymentSettings::from_map(self.settings.clone())
    }

    pub fn pinned_tools(&self) -> FixedToolLocator {
        let mut locator = FixedToolLocator::new();
        for (tool, paths) in &self.tools {
            for path in paths {
                locator.insert(*tool, path);
            }
        }
        locator
    }

    pub fn locator_options(&self, search_path: Option<String>, cwd: &Path) -> SystemToolLocatorOptions {
        SystemToolLocatorOptions {
            search_path,
            cwd: cwd.to_path_buf(),
            runtime_roots: self.locator.runtime_roots.iter().map(PathBuf::from).collect(),
            runtime_patterns: self.locator.runtime_patterns.clone(),
            npm_global_prefix: self.locator.npm_global_prefix.as_ref().map(PathBuf::from),
        }
    }
}
