// tests/payload_handlers.rs

use deployenv::payload::cloud_drive::{DEPLOYER, SYNC_MESSAGE};
use deployenv::payload::{parse_with, CloudDriveHandler, DeployAction, PayloadHandler};
use serde_json::json;

#[test]
fn cloud_drive_payload_becomes_a_request() {
    let payload = json!({
        "RepositoryUrl": "https://API.OneDrive.com/v1.0/drive/root:/site",
        "AccessToken": "secret-token",
    });

    let action = CloudDriveHandler.try_parse(&payload).unwrap();

    let request = match action {
        DeployAction::ProcessDeployment(request) => request,
        other => panic!("expected a deployment request, got {other:?}"),
    };
    assert_eq!(request.deployer, DEPLOYER);
    assert_eq!(
        request.repository_url,
        "https://API.OneDrive.com/v1.0/drive/root:/site"
    );
    assert_eq!(request.access_token.as_deref(), Some("secret-token"));
    assert_eq!(request.target_changeset.author_name, "Unknown");
    assert_eq!(request.target_changeset.author_email, "Unknown");
    assert_eq!(request.target_changeset.message, SYNC_MESSAGE);
    assert!(request.target_changeset.is_temporary);
}

#[test]
fn access_token_is_never_serialized() {
    let payload = json!({
        "RepositoryUrl": "https://api.onedrive.com/v1.0/drive/root:/site",
        "AccessToken": "secret-token",
    });
    let DeployAction::ProcessDeployment(request) = CloudDriveHandler.try_parse(&payload).unwrap()
    else {
        panic!("expected a deployment request");
    };

    let rendered = serde_json::to_string(&request).unwrap();

    assert!(!rendered.contains("secret-token"));
    assert!(rendered.contains("OneDrive"));
}

#[test]
fn other_providers_are_unknown() {
    let payloads = [
        json!({ "RepositoryUrl": "https://github.com/org/site.git" }),
        json!({ "RepositoryUrl": "   " }),
        json!({ "repository": { "url": "https://api.onedrive.com/x" } }),
        json!({ "RepositoryUrl": 42 }),
        json!(["not", "an", "object"]),
        json!(null),
    ];

    for payload in payloads {
        assert_eq!(
            CloudDriveHandler.try_parse(&payload).unwrap(),
            DeployAction::UnknownPayload,
            "{payload}"
        );
    }
}

#[test]
fn first_claiming_handler_wins() {
    struct Never;
    impl PayloadHandler for Never {
        fn try_parse(&self, _payload: &serde_json::Value) -> deployenv::errors::Result<DeployAction> {
            Ok(DeployAction::UnknownPayload)
        }
    }

    let payload = json!({ "RepositoryUrl": "https://api.onedrive.com/drive" });
    let handlers: [&dyn PayloadHandler; 2] = [&Never, &CloudDriveHandler];

    assert!(matches!(
        parse_with(&handlers, &payload).unwrap(),
        DeployAction::ProcessDeployment(_)
    ));
    assert_eq!(
        parse_with(&handlers[..1], &payload).unwrap(),
        DeployAction::UnknownPayload
    );
}
