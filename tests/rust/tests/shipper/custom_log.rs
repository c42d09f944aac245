//! Application log lines via `log_with_level`

use moolya_trace_core::{CustomLogEntry, Shipper};
use pretty_assertions::assert_eq;
use tests::{fixtures, SeverityLevel, TestBackend, TraceId, TracerConfig};

#[tokio::test]
async fn posts_custom_entry() {
    let backend = TestBackend::start().await;
    let shipper = Shipper::new(&TracerConfig::new(backend.url())).unwrap();
    let trace_id = TraceId::from("trace-custom");

    shipper
        .log_with_level(&trace_id, SeverityLevel::Debug, "Test", "This is a test")
        .await;

    let records = backend.records::<CustomLogEntry>().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].trace_id, trace_id);
    assert_eq!(records[0].level, SeverityLevel::Debug);
    assert_eq!(records[0].message, "Test");
    assert_eq!(records[0].details, "This is a test");
    assert!(!records[0].timestamp.is_empty());

    let raw = backend.records::<serde_json::Value>().await;
    assert_eq!(raw[0]["level"], "debug");
}

#[tokio::test]
async fn empty_details_are_omitted() {
    let backend = TestBackend::start().await;
    let shipper = Shipper::new(&TracerConfig::new(backend.url())).unwrap();

    shipper
        .log_with_level(&TraceId::from("t"), SeverityLevel::Info, "started", "")
        .await;

    let raw = backend.records::<serde_json::Value>().await;
    assert!(raw[0].get("details").is_none());
}

#[tokio::test]
async fn sends_api_key() {
    let backend = TestBackend::start().await;
    let shipper =
        Shipper::new(&TracerConfig::new(backend.url()).with_api_key("custom-key")).unwrap();

    shipper
        .log_with_level(&TraceId::from("t"), SeverityLevel::Error, "failed", "db down")
        .await;

    assert_eq!(
        backend.requests().await[0]
            .headers
            .get("x-moolya-api-key")
            .and_then(|v| v.to_str().ok()),
        Some("custom-key")
    );
}

#[tokio::test]
async fn failures_are_swallowed() {
    shipper_for(fixtures::UNREACHABLE_BACKEND)
        .log_with_level(&TraceId::from("t"), SeverityLevel::Info, "lost", "")
        .await;

    let backend = TestBackend::with_status(500).await;
    shipper_for(&backend.url())
        .log_with_level(&TraceId::from("t"), SeverityLevel::Info, "rejected", "")
        .await;
    assert_eq!(backend.requests().await.len(), 1);
}

#[tokio::test]
async fn tracer_shares_shipper_with_handlers() {
    let backend = TestBackend::start().await;
    let tracer = fixtures::tracer(&backend.url());

    tracer
        .shipper()
        .log_with_level(&TraceId::from("t"), SeverityLevel::Debug, "from handler", "")
        .await;

    let records = backend.records::<CustomLogEntry>().await;
    assert_eq!(records[0].message, "from handler");
}

fn shipper_for(url: &str) -> Shipper {
    Shipper::new(&TracerConfig::new(url)).unwrap()
}
