// src/fs/mod.rs

//! Read-only view of the host filesystem, as far as tool discovery needs it.

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod mock;

pub trait FileSystem: Send + Sync + Debug {
    fn is_dir(&self, path: &Path) -> bool;

    /// Full paths of the directories directly below `path`, sorted by path.
    ///
    /// Plain files are skipped. Sorting keeps discovery independent of the
    /// order the platform happens to list entries in.
    fn subdirectories(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn subdirectories(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("listing {}", path.display()))? {
            let child = entry
                .with_context(|| format!("listing {}", path.display()))?
                .path();
            // `Path::is_dir` follows symlinks, so linked installs count.
            if child.is_dir() {
                dirs.push(child);
            }
        }
        dirs.sort();
        Ok(dirs)
    }
}
