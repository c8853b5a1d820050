// src/payload/cloud_drive.rs

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::payload::{Changeset, DeployAction, DeploymentRequest, PayloadHandler};

/// Host every cloud drive sync payload points at.
pub const CLOUD_DRIVE_API_HOST: &str = "api.onedrive.com";

pub const DEPLOYER: &str = "OneDrive";
pub const SYNC_MESSAGE: &str = "Synchronizing with OneDrive";
const UNKNOWN_AUTHOR: &str = "Unknown";

/// Expected shape:
///
/// ```json
/// { "RepositoryUrl": "https://api.onedrive.com/...", "AccessToken": "..." }
/// ```
#[derive(Debug, Deserialize)]
struct CloudDrivePayload {
    #[serde(rename = "RepositoryUrl", default)]
    repository_url: Option<String>,
    #[serde(rename = "AccessToken", default)]
    access_token: Option<String>,
}

/// Claims payloads whose repository URL points at the cloud drive API.
#[derive(Debug, Clone, Default)]
pub struct CloudDriveHandler;

impl PayloadHandler for CloudDriveHandler {
    fn try_parse(&self, payload: &Value) -> Result<DeployAction> {
        // Payloads of other providers may not even be objects; they are simply
        // not ours.
        let Ok(parsed) = CloudDrivePayload::deserialize(payload) else {
            return Ok(DeployAction::UnknownPayload);
        };

        let url = match parsed.repository_url {
            Some(url)
                if !url.trim().is_empty()
                    && url.to_lowercase().contains(CLOUD_DRIVE_API_HOST) =>
            {
                url
            }
            _ => return Ok(DeployAction::UnknownPayload),
        };

        debug!(repository_url = %url, "claimed cloud drive payload");

        Ok(DeployAction::ProcessDeployment(DeploymentRequest {
            deployer: DEPLOYER.to_string(),
            repository_url: url,
            access_token: parsed.access_token,
            target_changeset: Changeset::temporary(UNKNOWN_AUTHOR, UNKNOWN_AUTHOR, SYNC_MESSAGE),
        }))
    }
}
