// src/descriptor/mod.rs

//! The launch descriptor handed to the process supervisor.
//!
//! A [`Descriptor`] can only be obtained from [`DescriptorBuilder::build`],
//! which consumes the builder, so a half-assembled environment never escapes
//! the factory.

pub mod builder;
pub mod fingerprint;

use std::path::{Path, PathBuf};
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::types::ValueOrigin;

pub use builder::DescriptorBuilder;

/// Environment variable holding the search path.
pub const PATH_VARIABLE: &str = "PATH";

/// Everything needed to launch one external command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    command: PathBuf,
    working_directory: PathBuf,
    #[serde(rename = "idle_timeout_secs", serialize_with = "serialize_secs")]
    idle_timeout: Duration,
    environment: IndexMap<String, String>,
    /// How each catalog key was resolved; keys copied verbatim from settings
    /// or hard-coded have no entry.
    origins: IndexMap<String, ValueOrigin>,
    search_path_prefix: Vec<PathBuf>,
}

impl Descriptor {
    pub fn command(&self) -> &Path {
        &self.command
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// All variables in the order they were first set.
    pub fn environment(&self) -> &IndexMap<String, String> {
        &self.environment
    }

    pub fn env(&self, key: &str) -> Option<&str> {
        self.environment.get(key).map(String::as_str)
    }

    pub fn origin(&self, key: &str) -> Option<ValueOrigin> {
        self.origins.get(key).copied()
    }

    /// Directories placed in front of the inherited search path.
    pub fn search_path_prefix(&self) -> &[PathBuf] {
        &self.search_path_prefix
    }

    /// Stable digest of the whole descriptor, for diagnostics.
    pub fn fingerprint(&self) -> String {
        fingerprint::compute(self)
    }
}

fn serialize_secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_secs())
}
