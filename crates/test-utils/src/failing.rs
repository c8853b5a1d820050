use std::path::PathBuf;
use std::time::Duration;

use deployenv::errors::{DeployEnvError, Result};
use deployenv::settings::SettingsProvider;
use deployenv::tools::{Tool, ToolLocator};

/// Settings store that is unreachable: every call fails.
#[derive(Debug, Default)]
pub struct FailingSettings;

impl FailingSettings {
    fn fail<T>(&self) -> Result<T> {
        Err(DeployEnvError::resolver_failure(
            "settings provider",
            "backing store unavailable",
        ))
    }
}

impl SettingsProvider for FailingSettings {
    fn get_value(&self, _key: &str) -> Result<Option<String>> {
        self.fail()
    }

    fn idle_timeout(&self) -> Result<Duration> {
        self.fail()
    }

    fn post_deployment_actions_dir(&self, _default: &str) -> Result<String> {
        self.fail()
    }

    fn all_values(&self) -> Result<Vec<(String, String)>> {
        self.fail()
    }
}

/// Locator whose probe for one tool fails; every other tool is absent.
#[derive(Debug)]
pub struct FailingToolLocator {
    pub broken: Tool,
}

impl ToolLocator for FailingToolLocator {
    fn resolve(&self, tool: Tool) -> Result<Option<PathBuf>> {
        if tool == self.broken {
            return Err(DeployEnvError::resolver_failure(
                "tool locator",
                format!("probing {tool} failed"),
            ));
        }
        Ok(None)
    }
}
