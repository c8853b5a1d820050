// src/config/validate.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DeployEnvError, Result};
use crate::settings::deployment::parse_idle_timeout;
use crate::settings::keys;
use crate::tools::Tool;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::DeployEnvError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_environment(&raw)?;
        let settings = validate_settings(&raw)?;
        let tools = validate_tools(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.environment, settings, tools, raw.locator))
    }
}

fn validate_environment(cfg: &RawConfigFile) -> Result<()> {
    let env = &cfg.environment;
    if env.root_path.trim().is_empty() {
        return Err(DeployEnvError::ConfigError(
            "[environment].root_path must not be empty".to_string(),
        ));
    }
    for (name, value) in [
        ("web_root_path", &env.web_root_path),
        ("script_path", &env.script_path),
        ("deployment_tools_path", &env.deployment_tools_path),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(DeployEnvError::ConfigError(format!(
                "[environment].{name} must not be empty when set"
            )));
        }
    }
    Ok(())
}

fn validate_settings(cfg: &RawConfigFile) -> Result<BTreeMap<String, String>> {
    let settings: BTreeMap<String, String> = cfg
        .settings
        .iter()
        .map(|(k, v)| (k.clone(), v.to_string()))
        .collect();

    if let Some(raw) = settings.get(keys::COMMAND_IDLE_TIMEOUT) {
        if !raw.trim().is_empty() {
            parse_idle_timeout(raw).map_err(|msg| {
                DeployEnvError::ConfigError(format!(
                    "[settings].{}: {msg}",
                    keys::COMMAND_IDLE_TIMEOUT
                ))
            })?;
        }
    }

    Ok(settings)
}

fn validate_tools(cfg: &RawConfigFile) -> Result<BTreeMap<Tool, Vec<PathBuf>>> {
    let mut tools = BTreeMap::new();
    for (name, location) in &cfg.tools {
        let tool: Tool = name
            .parse()
            .map_err(|msg| DeployEnvError::ConfigError(format!("[tools]: {msg}")))?;

        let paths = location.paths();
        if paths.iter().any(|p| p.trim().is_empty()) {
            return Err(DeployEnvError::ConfigError(format!(
                "[tools].{name} contains an empty path"
            )));
        }
        if paths.len() > 1 && tool != Tool::NodeRuntime {
            return Err(DeployEnvError::ConfigError(format!(
                "[tools].{name} accepts a single path"
            )));
        }

        tools.insert(tool, paths.into_iter().map(PathBuf::from).collect());
    }
    Ok(tools)
}
