//! Tests for Driver::run, slot substitution and error policies.

use std::fs;
use std::sync::Arc;

use crate::error::{ErrorPolicy, SourceError, Stage};
use crate::{DataSource, Driver, FileSource, InMemorySource, Lines, Provider, SourceKind, Tier};

#[derive(Debug)]
struct BrokenSource;

impl DataSource for BrokenSource {
    fn id(&self) -> &str {
        "broken"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::File
    }

    fn retrieve(&self) -> Result<Lines, SourceError> {
        Err(SourceError::new(Stage::Read, "broken", "disk on fire"))
    }
}

fn greeting() -> Provider {
    Provider::streaming(InMemorySource::new(
        "greeting",
        ["In", "Memory", "Data", "Source"],
    ))
}

async fn run_to_string(driver: &Driver) -> (String, Result<(), crate::AggregateError>) {
    let mut out: Vec<u8> = Vec::new();
    let result = driver.run(&mut out).await;
    (String::from_utf8(out).unwrap(), result)
}

#[tokio::test]
async fn driver_prints_each_slot_with_header_and_separator() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("abc.txt");
    fs::write(&path, "a\nb\nc").unwrap();

    let driver = Driver::new(
        vec![
            Some(greeting()),
            None,
            Some(Provider::streaming(FileSource::new(path).unwrap())),
        ],
        ErrorPolicy::FastFail,
    );

    let (output, result) = run_to_string(&driver).await;
    result.expect("run should succeed");

    let expected = "\
Source 0: in-memory
In
Memory
Data
Source

Source 1: null

Source 2: file
a
b
c

";
    assert_eq!(output, expected);
}

#[tokio::test]
async fn driver_substitutes_null_for_absent_slot() {
    let driver = Driver::new(vec![None, Some(greeting())], ErrorPolicy::FastFail);

    let resolved: Vec<SourceKind> = driver.providers().map(|p| p.kind()).collect();
    assert_eq!(resolved, vec![SourceKind::Null, SourceKind::InMemory]);
    assert!(driver.slots()[0].is_none());

    let (output, result) = run_to_string(&driver).await;
    result.unwrap();

    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("Source 0: null"));
    // No data lines before the separator.
    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.next(), Some("Source 1: in-memory"));
}

#[tokio::test]
async fn driver_fast_fail_aborts_on_first_failure() {
    let driver = Driver::new(
        vec![Some(greeting()), Some(Provider::sync(BrokenSource)), Some(greeting())],
        ErrorPolicy::FastFail,
    );

    let (output, result) = run_to_string(&driver).await;
    let agg = result.expect_err("broken source must abort the run");

    assert_eq!(agg.len(), 1);
    assert_eq!(agg.errors[0].stage, Stage::Read);
    assert_eq!(agg.errors[0].target, "broken");
    assert!(output.contains("Source 0: in-memory"));
    assert!(output.contains("Source 1: file"));
    assert!(!output.contains("Source 2"));
}

#[tokio::test]
async fn driver_accumulate_isolates_failures() {
    let driver = Driver::new(
        vec![
            Some(Provider::sync(BrokenSource)),
            Some(greeting()),
            Some(Provider::sync(BrokenSource)),
        ],
        ErrorPolicy::Accumulate,
    );

    let (output, result) = run_to_string(&driver).await;
    let agg = result.expect_err("failures are reported at the end");

    assert_eq!(agg.len(), 2);
    assert!(agg.errors.iter().all(|e| e.target == "broken"));
    assert!(output.contains("Source 1: in-memory\nIn\nMemory\nData\nSource\n\n"));
    assert!(output.ends_with("Source 2: file\n\n"));
}

#[tokio::test]
async fn driver_drain_uses_richest_tier() {
    let provider = greeting();
    assert_eq!(provider.tier(), Tier::Streaming);

    let lines = Driver::drain(&provider).await.unwrap();
    assert_eq!(lines, vec!["In", "Memory", "Data", "Source"]);

    let empty = Driver::drain(&Driver::resolve(None)).await.unwrap();
    assert!(empty.is_empty());

    let err = Driver::drain(&Provider::sync(BrokenSource))
        .await
        .expect_err("broken");
    assert_eq!(err.stage, Stage::Read);
}

#[tokio::test]
async fn driver_with_no_slots_writes_nothing() {
    let driver = Driver::new(Vec::new(), ErrorPolicy::default());

    let (output, result) = run_to_string(&driver).await;

    result.unwrap();
    assert!(output.is_empty());
    assert_eq!(driver.error_policy(), ErrorPolicy::FastFail);
}

#[test]
fn driver_resolve_keeps_configured_provider() {
    let provider = greeting();
    let resolved = Driver::resolve(Some(&provider));

    match (&provider, &resolved) {
        (Provider::Streaming(a), Provider::Streaming(b)) => assert!(Arc::ptr_eq(a, b)),
        _ => panic!("expected streaming providers"),
    }
}
