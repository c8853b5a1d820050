// src/tools/chained.rs

use std::path::PathBuf;

use crate::errors::Result;
use crate::tools::{Tool, ToolLocator};

/// Ask `primary` first and fall back to `fallback` when it knows nothing
/// about a tool.
///
/// Errors from `primary` are returned as-is; the fallback is only consulted
/// for tools that are genuinely absent from `primary`.
#[derive(Debug)]
pub struct ChainedToolLocator<P, F> {
    primary: P,
    fallback: F,
}

impl<P: ToolLocator, F: ToolLocator> ChainedToolLocator<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: ToolLocator, F: ToolLocator> ToolLocator for ChainedToolLocator<P, F> {
    fn resolve(&self, tool: Tool) -> Result<Option<PathBuf>> {
        match self.primary.resolve(tool)? {
            Some(path) => Ok(Some(path)),
            None => self.fallback.resolve(tool),
        }
    }

    fn resolve_all(&self, tool: Tool) -> Result<Vec<PathBuf>> {
        let pinned = self.primary.resolve_all(tool)?;
        if !pinned.is_empty() {
            return Ok(pinned);
        }
        self.fallback.resolve_all(tool)
    }
}
