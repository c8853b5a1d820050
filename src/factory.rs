// src/factory.rs

//! Descriptor construction for deployment commands.
//!
//! [`CommandFactory`] borrows its collaborators and keeps no state between
//! calls, so one factory can serve concurrent deployments as long as the
//! settings provider and tool locator tolerate concurrent reads.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::compose::catalog::{
    self, HostDefaults, StarterDefaults, GENERIC_KEYS, STARTER_KEYS,
};
use crate::compose::Compositor;
use crate::descriptor::{Descriptor, DescriptorBuilder};
use crate::environment::HostEnvironment;
use crate::errors::Result;
use crate::paths;
use crate::settings::{keys, SettingsProvider};
use crate::tools::{Tool, ToolLocator};

/// Tools whose directories go in front of the script directory.
const LEADING_TOOLS: [Tool; 4] = [Tool::BuildTool, Tool::Git, Tool::TestRunner, Tool::DatabaseCli];

/// Optional front-end build tools, appended last.
const TRAILING_TOOLS: [Tool; 3] = [Tool::Bower, Tool::Grunt, Tool::Gulp];

#[derive(Debug, Clone, Copy)]
pub struct CommandFactory<'a> {
    environment: &'a HostEnvironment,
    settings: &'a dyn SettingsProvider,
    tools: &'a dyn ToolLocator,
}

impl<'a> CommandFactory<'a> {
    pub fn new(
        environment: &'a HostEnvironment,
        settings: &'a dyn SettingsProvider,
        tools: &'a dyn ToolLocator,
    ) -> Self {
        Self {
            environment,
            settings,
            tools,
        }
    }

    /// Describe an arbitrary external command.
    pub fn build_generic_command(
        &self,
        command_path: impl AsRef<Path>,
        working_directory: impl AsRef<Path>,
        idle_timeout: Duration,
    ) -> Result<Descriptor> {
        let (builder, _) =
            self.generic_builder(command_path.as_ref(), working_directory.as_ref(), idle_timeout)?;
        Ok(builder.build())
    }

    /// Describe the deployment starter script run for a deployment from
    /// `source_path` into `target_path`.
    pub fn build_deployment_starter_command(
        &self,
        working_directory: impl AsRef<Path>,
        target_path: &str,
        source_path: &str,
    ) -> Result<Descriptor> {
        let starter = self
            .environment
            .require_script_path()?
            .join(catalog::STARTER_SCRIPT_NAME);
        let idle_timeout = self.settings.idle_timeout()?;

        let (mut builder, host) =
            self.generic_builder(&starter, working_directory.as_ref(), idle_timeout)?;

        let default_actions_dir = self
            .environment
            .deployment_tools_path
            .join("PostDeploymentActions");
        let post_deployment_actions_dir = self
            .settings
            .post_deployment_actions_dir(&default_actions_dir.to_string_lossy())?;

        let inputs = StarterDefaults {
            host,
            source_path: source_path.to_string(),
            target_path: target_path.to_string(),
            post_deployment_actions_dir,
        };
        let compositor = Compositor::new(self.settings);
        compositor.apply(&mut builder, STARTER_KEYS, &inputs)?;

        if self.is_in_place(source_path, target_path)? {
            info!(source = source_path, target = target_path, "in-place deployment detected");
            let resolved = compositor.resolve(
                catalog::IN_PLACE_DEPLOYMENT,
                catalog::IN_PLACE_MARKER.to_string(),
            )?;
            builder.resolved(catalog::IN_PLACE_DEPLOYMENT, resolved.value, resolved.origin);
        }

        builder.env(catalog::PACKAGE_RESTORE, catalog::PACKAGE_RESTORE_ENABLED);

        let descriptor = builder.build();
        debug!(
            command = %descriptor.command().display(),
            fingerprint = %descriptor.fingerprint(),
            "built deployment starter descriptor"
        );
        Ok(descriptor)
    }

    /// Shared part of every descriptor. Also hands back the defaults
    /// snapshot so the starter can extend it.
    fn generic_builder(
        &self,
        command_path: &Path,
        working_directory: &Path,
        idle_timeout: Duration,
    ) -> Result<(DescriptorBuilder, HostDefaults)> {
        let script_path = self.environment.require_script_path()?.to_path_buf();
        let host = HostDefaults {
            root_path: self.environment.root_path.clone(),
            web_root_path: self.environment.web_root_path.clone(),
            script_path,
            build_tool: self.tools.resolve(Tool::BuildTool)?,
            npm_cli: self.tools.resolve(Tool::NpmCli)?,
            bitness: self.environment.bitness(),
        };

        let mut builder = DescriptorBuilder::new(command_path, working_directory, idle_timeout);

        for (key, value) in self.settings.all_values()? {
            builder.env(key, value);
        }

        Compositor::new(self.settings).apply(&mut builder, GENERIC_KEYS, &host)?;

        builder.env(catalog::PACKAGE_RESTORE, catalog::PACKAGE_RESTORE_ENABLED);

        let prefix = self.search_path_prefix(&host.script_path)?;
        debug!(entries = prefix.len(), "search path prefix assembled");
        builder.prepend_to_path(prefix, self.environment.inherited_path.as_deref())?;

        Ok((builder, host))
    }

    fn search_path_prefix(&self, script_path: &Path) -> Result<Vec<PathBuf>> {
        let mut candidates: Vec<Option<PathBuf>> = Vec::new();

        for tool in LEADING_TOOLS {
            candidates.push(self.tool_directory(tool)?);
        }
        candidates.push(Some(script_path.to_path_buf()));
        candidates.extend(self.tools.resolve_all(Tool::NodeRuntime)?.into_iter().map(Some));
        candidates.push(self.tool_directory(Tool::NpmGlobalPrefix)?);
        for tool in TRAILING_TOOLS {
            candidates.push(self.tool_directory(tool)?);
        }

        Ok(paths::aggregate(candidates))
    }

    /// Directory to put on the search path for `tool`, if it is installed.
    fn tool_directory(&self, tool: Tool) -> Result<Option<PathBuf>> {
        let Some(location) = self.tools.resolve(tool)? else {
            return Ok(None);
        };
        if tool.resolves_to_directory() {
            return Ok(Some(location));
        }
        Ok(location.parent().map(Path::to_path_buf))
    }

    fn is_in_place(&self, source_path: &str, target_path: &str) -> Result<bool> {
        let project = self
            .settings
            .get_value(keys::PROJECT)?
            .filter(|p| !p.is_empty());

        Ok(match project {
            Some(project) => {
                let project_path = Path::new(source_path).join(project);
                paths::paths_equal(&project_path.to_string_lossy(), target_path)
            }
            None => paths::paths_equal(source_path, target_path),
        })
    }
}
