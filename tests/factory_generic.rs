// tests/factory_generic.rs

mod common;

use std::path::PathBuf;
use std::time::Duration;

use common::{script, search_path, TIMEOUT};
use deployenv::compose::catalog;
use deployenv::descriptor::PATH_VARIABLE;
use deployenv::errors::DeployEnvError;
use deployenv::factory::CommandFactory;
use deployenv::tools::{FixedToolLocator, Tool};
use deployenv::types::ValueOrigin;
use deployenv_test_utils::builders::{settings, HostEnvironmentBuilder, SCRIPTS};
use deployenv_test_utils::failing::{FailingSettings, FailingToolLocator};

#[test]
fn generic_command_carries_the_shared_catalog() {
    common::init_tracing();
    let host = HostEnvironmentBuilder::site().build();
    let settings = settings(&[]);
    let tools = FixedToolLocator::new()
        .with(Tool::BuildTool, "/opt/msbuild/bin/msbuild")
        .with(Tool::NpmCli, "/usr/lib/node_modules/npm/bin/npm-cli.js");
    let factory = CommandFactory::new(&host, &settings, &tools);

    let descriptor = factory
        .build_generic_command("/usr/bin/make", "/home/site/repository", TIMEOUT)
        .unwrap();

    assert_eq!(descriptor.command(), PathBuf::from("/usr/bin/make"));
    assert_eq!(
        descriptor.working_directory(),
        PathBuf::from("/home/site/repository")
    );
    assert_eq!(descriptor.idle_timeout(), TIMEOUT);

    assert_eq!(descriptor.env(catalog::WEBROOT_PATH), Some("/home/site/wwwroot"));
    assert_eq!(
        descriptor.env(catalog::MSBUILD_PATH),
        Some("/opt/msbuild/bin/msbuild")
    );
    assert_eq!(descriptor.env(catalog::SYNC_CMD), Some("kudusync"));
    assert_eq!(descriptor.env(catalog::NUGET_EXE), Some(script("nuget.exe").as_str()));
    assert_eq!(
        descriptor.env(catalog::NPM_JS_PATH),
        Some("/usr/lib/node_modules/npm/bin/npm-cli.js")
    );
    assert_eq!(descriptor.env(catalog::HOME), Some("/home/site"));
    assert_eq!(descriptor.env(catalog::PACKAGE_RESTORE), Some("true"));

    for key in [catalog::WEBROOT_PATH, catalog::SYNC_CMD, catalog::HOME] {
        assert_eq!(descriptor.origin(key), Some(ValueOrigin::Default), "{key}");
    }
}

#[test]
fn generic_command_has_no_starter_keys() {
    let host = HostEnvironmentBuilder::site().build();
    let settings = settings(&[]);
    let tools = FixedToolLocator::new();
    let factory = CommandFactory::new(&host, &settings, &tools);

    let descriptor = factory
        .build_generic_command("/usr/bin/make", "/work", TIMEOUT)
        .unwrap();

    for key in [
        catalog::DEPLOYMENT_SOURCE,
        catalog::DEPLOYMENT_TARGET,
        catalog::DNX_BITNESS,
        catalog::IN_PLACE_DEPLOYMENT,
    ] {
        assert!(descriptor.env(key).is_none(), "{key} should not be set");
    }
}

#[test]
fn only_git_installed_puts_its_directory_before_scripts() {
    let host = HostEnvironmentBuilder::site()
        .with_inherited_path("/bin")
        .build();
    let settings = settings(&[]);
    let tools = FixedToolLocator::new().with(Tool::Git, "/usr/bin/git");
    let factory = CommandFactory::new(&host, &settings, &tools);

    let descriptor = factory
        .build_generic_command("/usr/bin/make", "/work", TIMEOUT)
        .unwrap();

    assert_eq!(
        descriptor.search_path_prefix(),
        &[PathBuf::from("/usr/bin"), PathBuf::from(SCRIPTS)]
    );
    assert_eq!(
        descriptor.env(PATH_VARIABLE),
        Some(search_path(&["/usr/bin", SCRIPTS, "/bin"]).as_str())
    );
}

#[test]
fn search_path_follows_tool_order() {
    let host = HostEnvironmentBuilder::site().build();
    let settings = settings(&[]);
    let tools = FixedToolLocator::new()
        .with(Tool::Gulp, "/usr/local/bin/gulp")
        .with(Tool::NpmGlobalPrefix, "/home/site/npm")
        .with(Tool::NodeRuntime, "/opt/nodejs/20.11.1/bin")
        .with(Tool::NodeRuntime, "/opt/nodejs/18.19.0/bin")
        .with(Tool::DatabaseCli, "/opt/mssql-tools/bin/sqlcmd")
        .with(Tool::Git, "/usr/bin/git")
        .with(Tool::BuildTool, "/opt/msbuild/bin/msbuild");
    let factory = CommandFactory::new(&host, &settings, &tools);

    let descriptor = factory
        .build_generic_command("/usr/bin/make", "/work", TIMEOUT)
        .unwrap();

    let expected: Vec<PathBuf> = [
        "/opt/msbuild/bin",
        "/usr/bin",
        "/opt/mssql-tools/bin",
        SCRIPTS,
        "/opt/nodejs/20.11.1/bin",
        "/opt/nodejs/18.19.0/bin",
        "/home/site/npm",
        "/usr/local/bin",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect();
    assert_eq!(descriptor.search_path_prefix(), expected.as_slice());

    // Nothing inherited: the prefix alone, no trailing separator.
    let path = descriptor.env(PATH_VARIABLE).unwrap();
    assert!(!path.ends_with(deployenv::paths::SEARCH_PATH_SEPARATOR));
}

#[test]
fn tools_sharing_a_directory_are_both_listed() {
    let host = HostEnvironmentBuilder::site().build();
    let settings = settings(&[]);
    let tools = FixedToolLocator::new()
        .with(Tool::Git, "/usr/bin/git")
        .with(Tool::DatabaseCli, "/usr/bin/sqlcmd");
    let factory = CommandFactory::new(&host, &settings, &tools);

    let descriptor = factory
        .build_generic_command("/usr/bin/make", "/work", TIMEOUT)
        .unwrap();

    assert_eq!(
        descriptor.search_path_prefix(),
        &[
            PathBuf::from("/usr/bin"),
            PathBuf::from("/usr/bin"),
            PathBuf::from(SCRIPTS)
        ]
    );
}

#[test]
fn settings_are_exported_and_overrides_applied() {
    let host = HostEnvironmentBuilder::site().build();
    let settings = settings(&[
        ("CUSTOM_FLAG", "on"),
        ("SYNC_CMD", "rsync -a"),
        ("WEBROOT_PATH", ""),
    ]);
    let tools = FixedToolLocator::new();
    let factory = CommandFactory::new(&host, &settings, &tools);

    let descriptor = factory
        .build_generic_command("/usr/bin/make", "/work", TIMEOUT)
        .unwrap();

    assert_eq!(descriptor.env("CUSTOM_FLAG"), Some("on"));
    assert_eq!(descriptor.origin("CUSTOM_FLAG"), None);

    assert_eq!(descriptor.env(catalog::SYNC_CMD), Some("rsync -a"));
    assert_eq!(
        descriptor.origin(catalog::SYNC_CMD),
        Some(ValueOrigin::UserOverride)
    );

    // An empty override behaves as if the key were never set.
    assert_eq!(descriptor.env(catalog::WEBROOT_PATH), Some("/home/site/wwwroot"));
    assert_eq!(
        descriptor.origin(catalog::WEBROOT_PATH),
        Some(ValueOrigin::Default)
    );
}

#[test]
fn package_restore_cannot_be_overridden() {
    let host = HostEnvironmentBuilder::site().build();
    let settings = settings(&[(catalog::PACKAGE_RESTORE, "false")]);
    let tools = FixedToolLocator::new();
    let factory = CommandFactory::new(&host, &settings, &tools);

    let descriptor = factory
        .build_generic_command("/usr/bin/make", "/work", TIMEOUT)
        .unwrap();

    assert_eq!(descriptor.env(catalog::PACKAGE_RESTORE), Some("true"));
}

#[test]
fn missing_script_path_is_configuration_missing() {
    let host = HostEnvironmentBuilder::site().without_script_path().build();
    let settings = settings(&[]);
    let tools = FixedToolLocator::new();
    let factory = CommandFactory::new(&host, &settings, &tools);

    let err = factory
        .build_generic_command("/usr/bin/make", "/work", TIMEOUT)
        .unwrap_err();

    assert!(matches!(err, DeployEnvError::ConfigurationMissing(_)));
}

#[test]
fn empty_script_path_is_configuration_missing() {
    let host = HostEnvironmentBuilder::site().with_script_path("").build();
    let settings = settings(&[]);
    let tools = FixedToolLocator::new();
    let factory = CommandFactory::new(&host, &settings, &tools);

    let err = factory
        .build_generic_command("/usr/bin/make", "/work", TIMEOUT)
        .unwrap_err();

    assert!(matches!(err, DeployEnvError::ConfigurationMissing(_)));
}

#[test]
fn locator_failure_aborts_the_build() {
    let host = HostEnvironmentBuilder::site().build();
    let settings = settings(&[]);
    let tools = FailingToolLocator { broken: Tool::Git };
    let factory = CommandFactory::new(&host, &settings, &tools);

    let err = factory
        .build_generic_command("/usr/bin/make", "/work", TIMEOUT)
        .unwrap_err();

    match err {
        DeployEnvError::ResolverFailure { resolver, message } => {
            assert_eq!(resolver, "tool locator");
            assert!(message.contains("git"));
        }
        other => panic!("expected ResolverFailure, got {other:?}"),
    }
}

#[test]
fn settings_failure_aborts_the_build() {
    let host = HostEnvironmentBuilder::site().build();
    let tools = FixedToolLocator::new();
    let factory = CommandFactory::new(&host, &FailingSettings, &tools);

    let err = factory
        .build_generic_command("/usr/bin/make", "/work", TIMEOUT)
        .unwrap_err();

    assert!(matches!(err, DeployEnvError::ResolverFailure { .. }));
}

#[test]
fn identical_inputs_give_identical_descriptors() {
    let host = HostEnvironmentBuilder::site()
        .with_inherited_path("/bin")
        .build();
    let settings = settings(&[("SYNC_CMD", "rsync"), ("EXTRA", "1")]);
    let tools = FixedToolLocator::new()
        .with(Tool::Git, "/usr/bin/git")
        .with(Tool::NodeRuntime, "/opt/nodejs/20.11.1/bin");
    let factory = CommandFactory::new(&host, &settings, &tools);

    let first = factory
        .build_generic_command("/usr/bin/make", "/work", TIMEOUT)
        .unwrap();
    let second = factory
        .build_generic_command("/usr/bin/make", "/work", TIMEOUT)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(first.fingerprint().len(), 64);
}

#[test]
fn fingerprint_tracks_environment_changes() {
    let host = HostEnvironmentBuilder::site().build();
    let tools = FixedToolLocator::new();
    let plain = settings(&[]);
    let custom = settings(&[("SYNC_CMD", "rsync")]);

    let a = CommandFactory::new(&host, &plain, &tools)
        .build_generic_command("/usr/bin/make", "/work", TIMEOUT)
        .unwrap();
    let b = CommandFactory::new(&host, &custom, &tools)
        .build_generic_command("/usr/bin/make", "/work", TIMEOUT)
        .unwrap();
    let c = CommandFactory::new(&host, &plain, &tools)
        .build_generic_command("/usr/bin/make", "/work", Duration::from_secs(5))
        .unwrap();

    assert_ne!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());
}

#[test]
fn descriptor_serializes_with_origins() {
    let host = HostEnvironmentBuilder::site().build();
    let settings = settings(&[("SYNC_CMD", "rsync")]);
    let tools = FixedToolLocator::new();
    let descriptor = CommandFactory::new(&host, &settings, &tools)
        .build_generic_command("/usr/bin/make", "/work", TIMEOUT)
        .unwrap();

    let json = serde_json::to_value(&descriptor).unwrap();

    assert_eq!(json["idle_timeout_secs"], 60);
    assert_eq!(json["environment"]["SYNC_CMD"], "rsync");
    assert_eq!(json["origins"]["SYNC_CMD"], "user_override");
    assert_eq!(json["origins"]["HOME"], "default");
    assert_eq!(json["search_path_prefix"][0], SCRIPTS);
}
