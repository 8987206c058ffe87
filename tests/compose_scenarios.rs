use deploygen::{
    AddOn, AppError, ArtifactRole, Composer, CredentialPair, InputModel, RedisMode, StartupKind,
};
use serde_yaml::Value;

fn full_input(startup_kind: StartupKind) -> InputModel {
    InputModel::builder("livekit.example.com", "turn.example.com")
        .whip_domain("whip.example.com")
        .server_version("v1.8.0")
        .redis(RedisMode::Local, true)
        .add_on(AddOn::Egress)
        .add_on(AddOn::Ingress)
        .startup_kind(startup_kind)
        .build()
        .unwrap()
}

fn parse(contents: &str) -> Value {
    serde_yaml::from_str(contents).unwrap()
}

#[test]
fn local_preset_yields_core_artifacts_with_loopback_redis() {
    let input = InputModel::local_test().unwrap();
    let manifest = Composer::default().compose(&input).unwrap();

    assert_eq!(
        manifest.roles(),
        vec![ArtifactRole::Primary, ArtifactRole::Proxy, ArtifactRole::Orchestration]
    );
    let primary = parse(manifest.contents(ArtifactRole::Primary).unwrap());
    assert_eq!(primary["redis"]["address"].as_str(), Some("localhost:6379"));
}

#[test]
fn full_deployment_embeds_every_artifact_in_shell_script() {
    let manifest = Composer::default().compose(&full_input(StartupKind::ShellScript)).unwrap();

    assert_eq!(manifest.roles(), ArtifactRole::ALL.to_vec());
    let script = manifest.contents(ArtifactRole::Startup).unwrap();
    for role in [
        ArtifactRole::Primary,
        ArtifactRole::Proxy,
        ArtifactRole::Orchestration,
        ArtifactRole::Egress,
        ArtifactRole::Ingress,
        ArtifactRole::Redis,
    ] {
        let contents = manifest.contents(role).unwrap();
        assert!(script.contains(contents), "{role} should be embedded verbatim");
    }
    assert!(script.starts_with("#!/bin/sh"));
}

#[test]
fn cloud_init_embeds_artifacts_as_file_contents() {
    for kind in [StartupKind::CloudInitAmazon, StartupKind::CloudInitUbuntu] {
        let manifest = Composer::default().compose(&full_input(kind)).unwrap();
        let startup = manifest.get(ArtifactRole::Startup).unwrap();
        assert_eq!(startup.relative_path.to_str(), kind.file_name());

        let cloud_init = parse(&startup.contents);
        let files = cloud_init["write_files"].as_sequence().unwrap();
        for role in [ArtifactRole::Primary, ArtifactRole::Proxy, ArtifactRole::Egress] {
            let contents = manifest.contents(role).unwrap();
            assert!(
                files.iter().any(|f| f["content"].as_str() == Some(contents)),
                "{role} should be written by {kind}"
            );
        }
    }
}

#[test]
fn all_artifacts_share_one_credential_pair() {
    let manifest = Composer::default().compose(&full_input(StartupKind::None)).unwrap();

    let primary = parse(manifest.contents(ArtifactRole::Primary).unwrap());
    let keys = primary["keys"].as_mapping().unwrap();
    assert_eq!(keys.len(), 1);
    let (key, secret) = keys.iter().next().unwrap();

    for role in [ArtifactRole::Egress, ArtifactRole::Ingress] {
        let config = parse(manifest.contents(role).unwrap());
        assert_eq!(&config["api_key"], key, "{role} key");
        assert_eq!(&config["api_secret"], secret, "{role} secret");
        assert_eq!(config["redis"]["address"], primary["redis"]["address"]);
        assert_eq!(config["ws_url"].as_str(), Some("wss://livekit.example.com"));
    }
}

#[test]
fn same_input_and_credentials_render_identical_bytes() {
    let input = full_input(StartupKind::CloudInitUbuntu);
    let credentials = CredentialPair::issue();
    let composer = Composer::default();

    let first = composer.compose_with(&input, &credentials).unwrap();
    let second = composer.compose_with(&input, &credentials).unwrap();
    assert_eq!(first, second);
}

#[test]
fn separate_runs_issue_separate_credentials() {
    let input = InputModel::local_test().unwrap();
    let composer = Composer::default();

    let first = composer.compose(&input).unwrap();
    let second = composer.compose(&input).unwrap();
    assert_ne!(
        first.contents(ArtifactRole::Primary),
        second.contents(ArtifactRole::Primary)
    );
}

#[test]
fn external_redis_uses_placeholder_and_skips_local_redis() {
    let input = InputModel::builder("livekit.example.com", "turn.example.com")
        .redis(RedisMode::External, false)
        .add_on(AddOn::Egress)
        .build()
        .unwrap();
    let manifest = Composer::default().compose(&input).unwrap();

    assert!(!manifest.contains(ArtifactRole::Redis));
    let egress = parse(manifest.contents(ArtifactRole::Egress).unwrap());
    assert_eq!(egress["redis"]["address"].as_str(), Some("<redis-host>:6379"));
    let compose = parse(manifest.contents(ArtifactRole::Orchestration).unwrap());
    assert!(compose["services"].get("redis").is_none());
}

#[test]
fn same_turn_and_primary_domain_is_rejected() {
    let err = InputModel::builder("livekit.example.com", "livekit.example.com")
        .build()
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidInput(_)));
    assert!(err.is_validation());
}

#[test]
fn invalid_domain_is_rejected_before_rendering() {
    let err = InputModel::builder("not a domain", "turn.example.com").build().unwrap_err();
    assert!(matches!(err, AppError::InvalidDomain(ref domain) if domain == "not a domain"));
}

#[test]
fn whip_domain_requires_ingress() {
    let err = InputModel::builder("livekit.example.com", "turn.example.com")
        .whip_domain("whip.example.com")
        .build()
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}
