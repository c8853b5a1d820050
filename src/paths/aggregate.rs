// src/paths/aggregate.rs

use std::path::PathBuf;

use crate::errors::{DeployEnvError, Result};

/// Platform path-list separator.
pub const SEARCH_PATH_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Collapse optional candidate directories into a search-path prefix.
///
/// Absent and empty entries are dropped; everything else keeps its relative
/// order. Duplicates are kept as given: lookups are first-match-wins, so a
/// repeated directory is harmless and its first position is what counts.
pub fn aggregate<I, P>(candidates: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = Option<P>>,
    P: Into<PathBuf>,
{
    candidates
        .into_iter()
        .flatten()
        .map(Into::into)
        .filter(|dir: &PathBuf| !dir.as_os_str().is_empty())
        .collect()
}

/// Build the full search path: `prefix` entries first, then `inherited`.
///
/// With nothing inherited the result is the prefix alone, without a trailing
/// separator. An entry that cannot be represented in a search path (it
/// contains the separator itself) is rejected.
pub fn prepend(prefix: &[PathBuf], inherited: Option<&str>) -> Result<String> {
    let inherited = inherited.filter(|p| !p.is_empty());
    if prefix.is_empty() {
        return Ok(inherited.unwrap_or_default().to_string());
    }

    let joined = std::env::join_paths(prefix)
        .map_err(|e| DeployEnvError::InvalidSearchPath(e.to_string()))?
        .into_string()
        .map_err(|raw| {
            DeployEnvError::InvalidSearchPath(format!("{:?} is not valid UTF-8", raw))
        })?;

    Ok(match inherited {
        Some(rest) => format!("{joined}{SEARCH_PATH_SEPARATOR}{rest}"),
        None => joined,
    })
}
