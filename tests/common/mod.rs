#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use deployenv::paths::SEARCH_PATH_SEPARATOR;

pub use deployenv_test_utils::init_tracing;

pub const TIMEOUT: Duration = Duration::from_secs(60);

/// Join entries the way `PATH` is joined on this platform.
pub fn search_path(entries: &[&str]) -> String {
    entries.join(SEARCH_PATH_SEPARATOR.to_string().as_str())
}

pub fn script(name: &str) -> String {
    Path::new(deployenv_test_utils::builders::SCRIPTS)
        .join(name)
        .to_string_lossy()
        .into_owned()
}
