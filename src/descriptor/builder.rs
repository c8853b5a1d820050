// src/descriptor/builder.rs

use std::path::PathBuf;
use std::time::Duration;

use indexmap::IndexMap;

use crate::descriptor::{Descriptor, PATH_VARIABLE};
use crate::errors::Result;
use crate::paths;
use crate::types::ValueOrigin;

/// Mutable staging area for a [`Descriptor`].
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    command: PathBuf,
    working_directory: PathBuf,
    idle_timeout: Duration,
    environment: IndexMap<String, String>,
    origins: IndexMap<String, ValueOrigin>,
    search_path_prefix: Vec<PathBuf>,
}

impl DescriptorBuilder {
    pub fn new(
        command: impl Into<PathBuf>,
        working_directory: impl Into<PathBuf>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            command: command.into(),
            working_directory: working_directory.into(),
            idle_timeout,
            environment: IndexMap::new(),
            origins: IndexMap::new(),
            search_path_prefix: Vec::new(),
        }
    }

    /// Set a variable verbatim. Last write wins; the first write fixes the
    /// variable's position.
    pub fn env(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        self.origins.shift_remove(&key);
        self.environment.insert(key, value.into());
        self
    }

    /// Set a variable produced by the compositor, remembering its origin.
    pub fn resolved(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        origin: ValueOrigin,
    ) -> &mut Self {
        let key = key.into();
        self.environment.insert(key.clone(), value.into());
        self.origins.insert(key, origin);
        self
    }

    pub fn get_env(&self, key: &str) -> Option<&str> {
        self.environment.get(key).map(String::as_str)
    }

    /// Prepend `prefix` to `inherited` and store the result as `PATH`.
    ///
    /// This is the only place `PATH` is assembled; calling it again replaces
    /// the previous prefix rather than stacking on top of it.
    pub fn prepend_to_path(
        &mut self,
        prefix: Vec<PathBuf>,
        inherited: Option<&str>,
    ) -> Result<&mut Self> {
        let search_path = paths::prepend(&prefix, inherited)?;
        self.search_path_prefix = prefix;
        self.env(PATH_VARIABLE, search_path);
        Ok(self)
    }

    pub fn build(self) -> Descriptor {
        Descriptor {
            command: self.command,
            working_directory: self.working_directory,
            idle_timeout: self.idle_timeout,
            environment: self.environment,
            origins: self.origins,
            search_path_prefix: self.search_path_prefix,
        }
    }
}
