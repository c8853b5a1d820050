// src/tools/fixed.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::errors::Result;
use crate::tools::{Tool, ToolLocator};

/// Tool locations known up front.
///
/// Used for the `[tools]` config table (to pin tools regardless of what the
/// host search path contains) and as a deterministic locator in tests.
#[derive(Debug, Clone, Default)]
pub struct FixedToolLocator {
    locations: BTreeMap<Tool, Vec<PathBuf>>,
}

impl FixedToolLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location for `tool`. Repeated calls append, which is how several
    /// node runtimes are registered.
    pub fn with(mut self, tool: Tool, path: impl Into<PathBuf>) -> Self {
        self.insert(tool, path);
        self
    }

    pub fn insert(&mut self, tool: Tool, path: impl Into<PathBuf>) {
        self.locations.entry(tool).or_default().push(path.into());
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl ToolLocator for FixedToolLocator {
    fn resolve(&self, tool: Tool) -> Result<Option<PathBuf>> {
        Ok(self
            .locations
            .get(&tool)
            .and_then(|paths| paths.first())
            .cloned())
    }

    fn resolve_all(&self, tool: Tool) -> Result<Vec<PathBuf>> {
        Ok(self.locations.get(&tool).cloned().unwrap_or_default())
    }
}
