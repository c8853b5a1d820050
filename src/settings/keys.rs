// src/settings/keys.rs

/// Sub-directory of the repository that holds the deployable project.
pub const PROJECT: &str = "project";

/// Idle timeout for deployment commands, in whole seconds.
pub const COMMAND_IDLE_TIMEOUT: &str = "SCM_COMMAND_IDLE_TIMEOUT";

/// Alternative location for post-deployment actions.
pub const POST_DEPLOYMENT_ACTIONS_DIR: &str = "SCM_POST_DEPLOYMENT_ACTIONS_PATH";

pub const DEFAULT_COMMAND_IDLE_TIMEOUT_SECS: u64 = 60;
