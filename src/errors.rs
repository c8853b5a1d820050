// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployEnvError {
    /// A mandatory path (e.g. the starter script location) cannot be formed.
    #[error("Missing configuration: {0}")]
    ConfigurationMissing(String),

    /// A settings provider or tool locator failed instead of reporting "absent".
    #[error("{resolver} failed: {message}")]
    ResolverFailure { resolver: String, message: String },

    #[error("Invalid search path entry: {0}")]
    InvalidSearchPath(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DeployEnvError {
    pub fn resolver_failure(resolver: impl Into<String>, message: impl ToString) -> Self {
        Self::ResolverFailure {
            resolver: resolver.into(),
            message: message.to_string(),
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DeployEnvError>;
