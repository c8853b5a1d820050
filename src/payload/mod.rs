// src/payload/mod.rs

//! Mapping provider webhook payloads to deployment requests.
//!
//! A [`PayloadHandler`] inspects a JSON payload and either claims it,
//! producing a canonical [`DeploymentRequest`], or reports it as unknown so
//! the next handler can try. Handlers never start a deployment themselves.

pub mod cloud_drive;

use serde::Serialize;
use serde_json::Value;

use crate::errors::Result;

pub use cloud_drive::CloudDriveHandler;

/// Author and message recorded for a changeset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Changeset {
    pub author_name: String,
    pub author_email: String,
    pub message: String,
    /// Placeholder changeset, replaced once the source has been fetched.
    pub is_temporary: bool,
}

impl Changeset {
    pub fn temporary(
        author_name: impl Into<String>,
        author_email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            author_name: author_name.into(),
            author_email: author_email.into(),
            message: message.into(),
            is_temporary: true,
        }
    }
}

/// Canonical description of what to deploy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRequest {
    pub deployer: String,
    pub repository_url: String,
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub target_changeset: Changeset,
}

/// Decision of a handler for one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployAction {
    /// Not a payload this handler understands.
    UnknownPayload,
    ProcessDeployment(DeploymentRequest),
}

pub trait PayloadHandler: Send + Sync {
    fn try_parse(&self, payload: &Value) -> Result<DeployAction>;
}

/// Offer `payload` to each handler in turn; the first claim wins.
pub fn parse_with(handlers: &[&dyn PayloadHandler], payload: &Value) -> Result<DeployAction> {
    for handler in handlers {
        if let DeployAction::ProcessDeployment(request) = handler.try_parse(payload)? {
            return Ok(DeployAction::ProcessDeployment(request));
        }
    }
    Ok(DeployAction::UnknownPayload)
}
