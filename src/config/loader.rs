// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "Deployenv.toml";

/// Parse TOML text into a [`RawConfigFile`] without semantic checks.
pub fn parse_str(contents: &str) -> Result<RawConfigFile> {
    Ok(toml::from_str(contents)?)
}

/// Read and parse a config file. See [`parse_str`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_str(&contents)
}

/// Read, parse and validate a config file.
///
/// Validation rejects empty environment paths, an idle timeout that is not a
/// whole number of seconds, and unknown or malformed `[tools]` entries. The
/// script directory is deliberately allowed to be absent here: only building a
/// descriptor needs it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let config = ConfigFile::try_from(load_from_path(path)?)?;
    debug!(
        path = %path.display(),
        settings = config.settings.len(),
        pinned_tools = config.tools.len(),
        "loaded config"
    );
    Ok(config)
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}
