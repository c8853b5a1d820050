#![allow(dead_code)]

use std::path::PathBuf;

use deployenv::environment::HostEnvironment;
use deployenv::settings::DeploymentSettings;
use deployenv::types::Bitness;

/// Root used by [`HostEnvironmentBuilder::site`].
pub const SITE_ROOT: &str = "/home/site";
/// Script directory used by [`HostEnvironmentBuilder::site`].
pub const SCRIPTS: &str = "/opt/deployenv/scripts";

/// Builder for `HostEnvironment` with a fixed, platform-independent layout.
///
/// Bitness is pinned to `X64` so expectations do not depend on the machine
/// running the tests.
pub struct HostEnvironmentBuilder {
    env: HostEnvironment,
}

impl HostEnvironmentBuilder {
    pub fn new(root: &str) -> Self {
        let mut env = HostEnvironment::new(root, PathBuf::from(root).join("wwwroot"));
        env.process_bitness = Bitness::X64;
        Self { env }
    }

    /// The usual test host: `/home/site` with scripts under
    /// `/opt/deployenv/scripts` and nothing inherited.
    pub fn site() -> Self {
        Self::new(SITE_ROOT).with_script_path(SCRIPTS)
    }

    pub fn with_script_path(mut self, path: &str) -> Self {
        self.env.script_path = Some(PathBuf::from(path));
        self
    }

    pub fn without_script_path(mut self) -> Self {
        self.env.script_path = None;
        self
    }

    pub fn with_web_root(mut self, path: &str) -> Self {
        self.env.web_root_path = PathBuf::from(path);
        self
    }

    pub fn with_deployment_tools(mut self, path: &str) -> Self {
        self.env.deployment_tools_path = PathBuf::from(path);
        self
    }

    pub fn with_inherited_path(mut self, path: &str) -> Self {
        self.env.inherited_path = Some(path.to_string());
        self
    }

    pub fn with_site_bitness(mut self, value: &str) -> Self {
        self.env.site_bitness = Some(value.to_string());
        self
    }

    pub fn with_process_bitness(mut self, bitness: Bitness) -> Self {
        self.env.process_bitness = bitness;
        self
    }

    pub fn build(self) -> HostEnvironment {
        self.env
    }
}

/// Settings from `(key, value)` pairs.
pub fn settings(pairs: &[(&str, &str)]) -> DeploymentSettings {
    let mut settings = DeploymentSettings::new();
    for (key, value) in pairs {
        settings.set(*key, *value);
    }
    settings
}
