// src/compose/catalog.rs

//! Recognised environment keys and their computed defaults.
//!
//! Every default is a plain function of an input snapshot taken before
//! resolution starts, so the same snapshot always yields the same values.

use std::path::{Path, PathBuf};

use crate::types::Bitness;

pub const WEBROOT_PATH: &str = "WEBROOT_PATH";
pub const MSBUILD_PATH: &str = "MSBUILD_PATH";
pub const SYNC_CMD: &str = "SYNC_CMD";
pub const NUGET_EXE: &str = "NUGET_EXE";
pub const NPM_JS_PATH: &str = "NPM_JS_PATH";
pub const HOME: &str = "HOME";

pub const DEPLOYMENT_SOURCE: &str = "DEPLOYMENT_SOURCE";
pub const DEPLOYMENT_TARGET: &str = "DEPLOYMENT_TARGET";
pub const POST_DEPLOYMENT_ACTION: &str = "POST_DEPLOYMENT_ACTION";
pub const POST_DEPLOYMENT_ACTION_DIR: &str = "POST_DEPLOYMENT_ACTION_DIR";
pub const SELECT_NODE_VERSION_CMD: &str = "SELECT_NODE_VERSION_CMD";
pub const SELECT_PYTHON_VERSION_CMD: &str = "SELECT_PYTHON_VERSION_CMD";
pub const WEBJOBS_DEPLOY_CMD: &str = "WEBJOBS_DEPLOY_CMD";
pub const DNX_CLR: &str = "DNX_CLR";
pub const DNX_BITNESS: &str = "DNX_BITNESS";
pub const DNVM_PATH: &str = "DNVM_PATH";
pub const GO_WEB_CONFIG_TEMPLATE: &str = "GO_WEB_CONFIG_TEMPLATE";

/// Set (to `1` by default) only when source and target are the same place.
pub const IN_PLACE_DEPLOYMENT: &str = "IN_PLACE_DEPLOYMENT";

/// Package restore switch. Always `true`; never read from settings.
pub const PACKAGE_RESTORE: &str = "EnableNuGetPackageRestore";
pub const PACKAGE_RESTORE_ENABLED: &str = "true";

pub const SYNC_COMMAND: &str = "kudusync";
pub const POST_DEPLOYMENT_ACTIONS_COMMAND: &str = "postdeployment";
pub const WEBJOBS_DEPLOY_COMMAND: &str = "deploy_webjobs.cmd";
pub const DEFAULT_CLR: &str = "clr";
pub const IN_PLACE_MARKER: &str = "1";

/// Name of the starter script inside the script directory.
pub const STARTER_SCRIPT_NAME: &str = "starter.cmd";

/// One recognised key and how to compute its default from `I`.
pub struct CatalogEntry<I> {
    pub key: &'static str,
    pub default: fn(&I) -> String,
}

/// Snapshot shared by every descriptor.
#[derive(Debug, Clone)]
pub struct HostDefaults {
    pub root_path: PathBuf,
    pub web_root_path: PathBuf,
    pub script_path: PathBuf,
    pub build_tool: Option<PathBuf>,
    pub npm_cli: Option<PathBuf>,
    pub bitness: Bitness,
}

/// Snapshot for the deployment starter command.
#[derive(Debug, Clone)]
pub struct StarterDefaults {
    pub host: HostDefaults,
    pub source_path: String,
    pub target_path: String,
    pub post_deployment_actions_dir: String,
}

pub static GENERIC_KEYS: &[CatalogEntry<HostDefaults>] = &[
    CatalogEntry {
        key: WEBROOT_PATH,
        default: |h| display(&h.web_root_path),
    },
    CatalogEntry {
        key: MSBUILD_PATH,
        default: |h| h.build_tool.as_deref().map(display).unwrap_or_default(),
    },
    CatalogEntry {
        key: SYNC_CMD,
        default: |_| SYNC_COMMAND.to_string(),
    },
    CatalogEntry {
        key: NUGET_EXE,
        default: |h| script(h, "nuget.exe"),
    },
    CatalogEntry {
        key: NPM_JS_PATH,
        default: |h| h.npm_cli.as_deref().map(display).unwrap_or_default(),
    },
    CatalogEntry {
        key: HOME,
        default: |h| display(&h.root_path),
    },
];

pub static STARTER_KEYS: &[CatalogEntry<StarterDefaults>] = &[
    CatalogEntry {
        key: DEPLOYMENT_SOURCE,
        default: |s| s.source_path.clone(),
    },
    CatalogEntry {
        key: DEPLOYMENT_TARGET,
        default: |s| s.target_path.clone(),
    },
    CatalogEntry {
        key: POST_DEPLOYMENT_ACTION,
        default: |_| POST_DEPLOYMENT_ACTIONS_COMMAND.to_string(),
    },
    CatalogEntry {
        key: POST_DEPLOYMENT_ACTION_DIR,
        default: |s| s.post_deployment_actions_dir.clone(),
    },
    CatalogEntry {
        key: SELECT_NODE_VERSION_CMD,
        default: |s| format!("node {}", quoted(&script(&s.host, "selectNodeVersion"))),
    },
    CatalogEntry {
        key: SELECT_PYTHON_VERSION_CMD,
        default: |s| {
            format!(
                "python {}",
                quoted(&script(&s.host, "select_python_version.py"))
            )
        },
    },
    CatalogEntry {
        key: WEBJOBS_DEPLOY_CMD,
        default: |_| WEBJOBS_DEPLOY_COMMAND.to_string(),
    },
    CatalogEntry {
        key: DNX_CLR,
        default: |_| DEFAULT_CLR.to_string(),
    },
    CatalogEntry {
        key: DNX_BITNESS,
        default: |s| s.host.bitness.to_string(),
    },
    CatalogEntry {
        key: DNVM_PATH,
        default: |s| script(&s.host, "dnvm.ps1"),
    },
    CatalogEntry {
        key: GO_WEB_CONFIG_TEMPLATE,
        default: |s| script(&s.host, "go.web.config.template"),
    },
];

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn script(host: &HostDefaults, name: &str) -> String {
    display(&host.script_path.join(name))
}

fn quoted(path: &str) -> String {
    format!("\"{path}\"")
}
