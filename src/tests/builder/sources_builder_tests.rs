//! End-to-end tests for SourcesBuilder and config-driven drivers.

use std::fs;

use crate::config::{SourceConfig, SourcesConfig};
use crate::error::{ErrorPolicy, Stage};
use crate::{
    InMemorySource, Provider, SourceKind, SourcesBuilder, Tier, build_driver_from_config,
    build_driver_from_config_with,
};

#[tokio::test]
async fn builder_runs_memory_file_and_absent_slots() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lines.txt");
    fs::write(&path, "a\nb\nc\n").unwrap();

    let driver = SourcesBuilder::new()
        .add_memory("greeting", ["In", "Memory", "Data", "Source"])
        .add_absent()
        .add_file(path.to_string_lossy())
        .build()
        .expect("build driver");

    assert_eq!(driver.slots().len(), 3);
    assert!(driver.slots()[1].is_none());
    assert!(
        driver
            .providers()
            .filter(|p| p.kind() != SourceKind::Null)
            .all(|p| p.tier() == Tier::Streaming)
    );

    let mut out: Vec<u8> = Vec::new();
    driver.run(&mut out).await.unwrap();
    let output = String::from_utf8(out).unwrap();

    assert!(output.starts_with("Source 0: in-memory\nIn\nMemory\nData\nSource\n\n"));
    assert!(output.contains("Source 1: null\n\n"));
    assert!(output.ends_with("Source 2: file\na\nb\nc\n\n"));
}

#[test]
fn builder_rejects_memory_without_lines() {
    let err = SourcesBuilder::new()
        .add_source(SourceConfig::new("memory").with_id("empty-handed"))
        .build()
        .expect_err("lines are required");

    assert_eq!(err.len(), 1);
    assert_eq!(err.errors[0].stage, Stage::Construct);
    assert_eq!(err.errors[0].target, "empty-handed");
}

#[test]
fn builder_accepts_memory_with_empty_lines() {
    let driver = SourcesBuilder::new()
        .add_memory("nothing", Vec::<String>::new())
        .build()
        .unwrap();

    let provider = driver.providers().next().unwrap();
    assert_eq!(provider.kind(), SourceKind::InMemory);
    assert!(provider.retrieve().unwrap().is_empty());
}

#[test]
fn builder_fast_fail_stops_at_first_bad_slot() {
    let err = SourcesBuilder::new()
        .add_source(SourceConfig::new("ftp"))
        .add_source(SourceConfig::new("file"))
        .with_mode(ErrorPolicy::FastFail)
        .build()
        .expect_err("unknown kind");

    assert_eq!(err.len(), 1);
    assert_eq!(err.errors[0].stage, Stage::Resolve);
    assert_eq!(err.errors[0].target, "slot 0");
}

#[test]
fn builder_accumulate_collects_every_bad_slot() {
    let err = SourcesBuilder::new()
        .add_source(SourceConfig::new("ftp"))
        .add_memory("fine", ["ok"])
        .add_source(SourceConfig::new("file"))
        .add_source(SourceConfig::new("file").with_path(""))
        .with_mode(ErrorPolicy::Accumulate)
        .build()
        .expect_err("three bad slots");

    let stages: Vec<Stage> = err.errors.iter().map(|e| e.stage).collect();
    assert_eq!(stages, vec![Stage::Resolve, Stage::Construct, Stage::Construct]);
}

#[test]
fn builder_keeps_prebuilt_providers_in_order() {
    let driver = SourcesBuilder::new()
        .add_absent()
        .add_provider(Provider::sync(InMemorySource::new("sync-only", ["s"])))
        .add_source(SourceConfig::new("null"))
        .build()
        .unwrap();

    let tiers: Vec<Tier> = driver.providers().map(|p| p.tier()).collect();
    assert_eq!(tiers, vec![Tier::Sync, Tier::Sync, Tier::Sync]);
    assert!(driver.slots()[2].is_some());
}

#[test]
fn config_error_policy_is_applied() {
    let cfg = SourcesConfig::new()
        .add_source(SourceConfig::new("memory").with_lines(["x"]))
        .with_error_policy("accumulate");

    let driver = build_driver_from_config(cfg).unwrap();

    assert_eq!(driver.error_policy(), ErrorPolicy::Accumulate);
    assert_eq!(driver.providers().next().unwrap().id(), "memory");
}

#[test]
fn config_unknown_error_policy_is_rejected() {
    let cfg = SourcesConfig::new().with_error_policy("retry-forever");

    let err = build_driver_from_config(cfg).expect_err("unknown policy");
    assert_eq!(err.errors[0].stage, Stage::Resolve);
}

#[test]
fn config_customize_hook_can_append_providers() {
    let cfg = SourcesConfig::new().add_absent();

    let driver = build_driver_from_config_with(cfg, |b| {
        b.add_provider(Provider::streaming(InMemorySource::new("extra", ["e"])))
    })
    .unwrap();

    assert_eq!(driver.slots().len(), 2);
}

#[cfg(feature = "http")]
#[test]
fn builder_rejects_http_without_url() {
    let err = SourcesBuilder::new()
        .add_source(SourceConfig::new("http").with_id("api"))
        .build()
        .expect_err("url is required");

    assert_eq!(err.errors[0].stage, Stage::Construct);
    assert_eq!(err.errors[0].target, "api");
}

#[cfg(feature = "http")]
#[tokio::test]
async fn builder_http_slot_uses_shared_client() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/lines")
        .with_status(200)
        .with_body(r#"["x","y"]"#)
        .create_async()
        .await;

    let driver = SourcesBuilder::new()
        .with_client(reqwest::Client::new())
        .add_http(format!("{}/lines", server.url()))
        .build()
        .unwrap();

    let mut out: Vec<u8> = Vec::new();
    driver.run(&mut out).await.unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "Source 0: http\nx\ny\n\n");
}
