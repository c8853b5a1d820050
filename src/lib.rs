// src/lib.rs

pub mod cli;
pub mod compose;
pub mod config;
pub mod descriptor;
pub mod environment;
pub mod errors;
pub mod factory;
pub mod fs;
pub mod logging;
pub mod paths;
pub mod payload;
pub mod settings;
pub mod tools;
pub mod types;

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{CliArgs, CliCommand};
use crate::config::{default_config_path, load_and_validate};
use crate::config::ConfigFile;
use crate::environment::SITE_BITNESS_VAR;
use crate::fs::RealFileSystem;
use crate::payload::{CloudDriveHandler, DeployAction, PayloadHandler};
use crate::settings::{DeploymentSettings, SettingsProvider};
use crate::tools::{ChainedToolLocator, SystemToolLocator, ToolLocator};

pub use crate::descriptor::{Descriptor, DescriptorBuilder};
pub use crate::environment::HostEnvironment;
pub use crate::errors::DeployEnvError;
pub use crate::factory::CommandFactory;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the process edge (inherited `PATH`, site bitness, current directory)
/// - settings + tool locators
/// - the command factory
/// - output
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let descriptor = match args.command {
        CliCommand::Payload { file } => return print_payload(Path::new(&file), args.json),
        CliCommand::Generic {
            command,
            cwd,
            idle_timeout,
        } => {
            let session = Session::load(&config_path)?;
            let idle_timeout = match idle_timeout {
                Some(secs) => Duration::from_secs(secs),
                None => session.settings.idle_timeout()?,
            };
            session
                .factory()
                .build_generic_command(&command, &cwd, idle_timeout)?
        }
        CliCommand::Starter { cwd, source, target } => {
            let session = Session::load(&config_path)?;
            session
                .factory()
                .build_deployment_starter_command(&cwd, &target, &source)?
        }
    };

    info!(
        command = %descriptor.command().display(),
        variables = descriptor.environment().len(),
        "descriptor ready"
    );
    print_descriptor(&descriptor, args.json)
}

/// Collaborators owned for the duration of one CLI invocation.
struct Session {
    host: HostEnvironment,
    settings: DeploymentSettings,
    locator: Box<dyn ToolLocator>,
}

impl Session {
    fn load(config_path: &Path) -> Result<Self> {
        let cfg = load_and_validate(config_path)
            .with_context(|| format!("loading config {}", config_path.display()))?;

        // The only place the ambient process environment is read.
        let inherited_path = std::env::var("PATH").ok();
        let cwd = std::env::current_dir().context("reading current directory")?;

        let mut host = cfg.host_environment(inherited_path.clone());
        if host.site_bitness.is_none() {
            host.site_bitness = std::env::var(SITE_BITNESS_VAR).ok();
        }

        Ok(Self {
            host,
            settings: cfg.deployment_settings(),
            locator: build_locator(&cfg, inherited_path, &cwd)?,
        })
    }

    fn factory(&self) -> CommandFactory<'_> {
        CommandFactory::new(&self.host, &self.settings, self.locator.as_ref())
    }
}

/// Pinned `[tools]` first; probe the host for the rest unless disabled.
fn build_locator(
    cfg: &ConfigFile,
    search_path: Option<String>,
    cwd: &Path,
) -> Result<Box<dyn ToolLocator>> {
    let pinned = cfg.pinned_tools();
    if pinned.is_empty() {
        debug!("no tools pinned in config");
    }
    if !cfg.locator.probe_system {
        debug!("system tool probing disabled; using pinned tools only");
        return Ok(Box::new(pinned));
    }

    let system = SystemToolLocator::new(RealFileSystem, cfg.locator_options(search_path, cwd))?;
    Ok(Box::new(ChainedToolLocator::new(pinned, system)))
}

#[derive(Serialize)]
struct DescriptorReport<'a> {
    fingerprint: String,
    #[serde(flatten)]
    descriptor: &'a Descriptor,
}

fn print_descriptor(descriptor: &Descriptor, json: bool) -> Result<()> {
    if json {
        let report = DescriptorReport {
            fingerprint: descriptor.fingerprint(),
            descriptor,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("deployenv descriptor");
    println!("  command: {}", descriptor.command().display());
    println!(
        "  working_directory: {}",
        descriptor.working_directory().display()
    );
    println!("  idle_timeout: {}s", descriptor.idle_timeout().as_secs());
    println!("  fingerprint: {}", descriptor.fingerprint());
    println!();

    println!("environment ({}):", descriptor.environment().len());
    for (key, value) in descriptor.environment() {
        match descriptor.origin(key) {
            Some(origin) => println!("  {key}={value}  [{origin}]"),
            None => println!("  {key}={value}"),
        }
    }
    println!();

    println!("search path prefix:");
    for dir in descriptor.search_path_prefix() {
        println!("  - {}", dir.display());
    }

    Ok(())
}

fn print_payload(file: &Path, json: bool) -> Result<()> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("reading payload {}", file.display()))?;
    let payload: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("parsing payload {}", file.display()))?;

    let handlers: [&dyn PayloadHandler; 1] = [&CloudDriveHandler];
    let request = match payload::parse_with(&handlers, &payload)? {
        DeployAction::ProcessDeployment(request) => request,
        DeployAction::UnknownPayload => bail!("no handler recognised {}", file.display()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    println!("deployment request");
    println!("  deployer: {}", request.deployer);
    println!("  repository_url: {}", request.repository_url);
    println!(
        "  access_token: {}",
        if request.access_token.is_some() { "<set>" } else { "<none>" }
    );
    println!(
        "  changeset: {} <{}> \"{}\"{}",
        request.target_changeset.author_name,
        request.target_changeset.author_email,
        request.target_changeset.message,
        if request.target_changeset.is_temporary { " (temporary)" } else { "" }
    );
    Ok(())
}
