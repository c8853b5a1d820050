// src/settings/deployment.rs

use std::collections::BTreeMap;
use std::time::Duration;

use crate::errors::{DeployEnvError, Result};
use crate::settings::keys;
use crate::settings::SettingsProvider;

/// Settings held in an ordered map, e.g. the `[settings]` table of the config
/// file.
///
/// Keys are matched exactly; iteration order (and therefore the order in
/// which settings are exported) is the sorted key order.
#[derive(Debug, Clone, Default)]
pub struct DeploymentSettings {
    values: BTreeMap<String, String>,
}

impl DeploymentSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse an idle timeout expressed in whole seconds.
pub fn parse_idle_timeout(raw: &str) -> std::result::Result<Duration, String> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| format!("invalid idle timeout '{raw}': {e}"))
}

impl SettingsProvider for DeploymentSettings {
    fn get_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn idle_timeout(&self) -> Result<Duration> {
        match self.values.get(keys::COMMAND_IDLE_TIMEOUT) {
            Some(raw) if !raw.trim().is_empty() => parse_idle_timeout(raw)
                .map_err(|msg| DeployEnvError::resolver_failure("settings provider", msg)),
            _ => Ok(Duration::from_secs(keys::DEFAULT_COMMAND_IDLE_TIMEOUT_SECS)),
        }
    }

    fn post_deployment_actions_dir(&self, default: &str) -> Result<String> {
        Ok(self
            .values
            .get(keys::POST_DEPLOYMENT_ACTIONS_DIR)
            .filter(|dir| !dir.is_empty())
            .cloned()
            .unwrap_or_else(|| default.to_string()))
    }

    fn all_values(&self) -> Result<Vec<(String, String)>> {
        Ok(self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
