//! Shared fixtures for the deployenv test suites.
//!
//! - [`builders`]: host layouts and settings.
//! - [`failing`]: collaborators whose backing store is broken.

pub mod builders;
pub mod failing;

use std::sync::Once;

use deployenv::logging::{build_filter, LOG_ENV_VAR};
use tracing_subscriber::fmt;

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Honours the same `DEPLOYENV_LOG` filter as the binary, e.g.
/// `DEPLOYENV_LOG=deployenv=debug cargo test -- --nocapture`. Output goes
/// through the test writer, so it only shows up for failing tests unless
/// capture is disabled.
pub fn init_tracing() {
    INIT.call_once(|| {
        let from_env = std::env::var(LOG_ENV_VAR).ok();
        let Ok(filter) = build_filter(None, from_env.as_deref()) else {
            eprintln!("ignoring malformed {LOG_ENV_VAR}");
            return;
        };

        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
