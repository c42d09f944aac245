//! Trace id resolution, echo and propagation

use axum::body::Body;
use axum::http::Request;
use tests::app::{request, send, test_router};
use tests::{fixtures, init_test_tracing, TestBackend};
use uuid::Uuid;

#[tokio::test]
async fn generates_trace_id_when_absent() {
    init_test_tracing();
    let backend = TestBackend::start().await;
    let router = test_router(fixtures::tracer(&backend.url()));

    let response = send(router, request("GET", "/test", Body::empty())).await;

    assert_eq!(response.status, 200);
    let trace_id = response.trace_id().expect("response carries X-Trace-ID");
    assert!(Uuid::parse_str(trace_id).is_ok(), "not a UUID: {}", trace_id);

    let entry = backend.only_entry().await;
    assert_eq!(entry.trace_id.as_str(), trace_id);
    assert_eq!(entry.method, "GET");
    assert_eq!(entry.url, "/test");
    assert_eq!(entry.status_code, 200);
    assert_eq!(entry.level, tests::SeverityLevel::Info);
}

#[tokio::test]
async fn reuses_inbound_trace_id() {
    let backend = TestBackend::start().await;
    let router = test_router(fixtures::tracer(&backend.url()));

    let request = Request::builder()
        .method("GET")
        .uri("/test")
        .header("X-Trace-ID", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = send(router, request).await;

    assert_eq!(response.trace_id(), Some("abc-123"));
    assert_eq!(backend.only_entry().await.trace_id.as_str(), "abc-123");
}

#[tokio::test]
async fn empty_inbound_header_gets_fresh_id() {
    let backend = TestBackend::start().await;
    let router = test_router(fixtures::tracer(&backend.url()));

    let request = Request::builder()
        .uri("/test")
        .header("X-Trace-ID", "")
        .body(Body::empty())
        .unwrap();
    let response = send(router, request).await;

    let trace_id = response.trace_id().expect("response carries X-Trace-ID");
    assert!(Uuid::parse_str(trace_id).is_ok());
}

#[tokio::test]
async fn handler_sees_same_trace_id() {
    let backend = TestBackend::start().await;
    let router = test_router(fixtures::tracer(&backend.url()));

    let response = send(router, request("GET", "/whoami", Body::empty())).await;

    assert_eq!(Some(response.text().as_str()), response.trace_id());
}

#[tokio::test]
async fn distinct_requests_get_distinct_ids() {
    let backend = TestBackend::start().await;
    let router = test_router(fixtures::tracer(&backend.url()));

    let (a, b) = tokio::join!(
        send(router.clone(), request("GET", "/test", Body::empty())),
        send(router, request("DELETE", "/test", Body::empty())),
    );

    assert_ne!(a.trace_id(), b.trace_id());

    let mut shipped: Vec<String> = backend
        .entries()
        .await
        .into_iter()
        .map(|e| e.trace_id.into_inner())
        .collect();
    shipped.sort();
    let mut expected = vec![
        a.trace_id().unwrap().to_string(),
        b.trace_id().unwrap().to_string(),
    ];
    expected.sort();
    assert_eq!(shipped, expected);
}

#[tokio::test]
async fn query_string_is_part_of_url() {
    let backend = TestBackend::start().await;
    let router = test_router(fixtures::tracer(&backend.url()));

    send(router, request("GET", "/test?page=2&sort=asc", Body::empty())).await;

    assert_eq!(backend.only_entry().await.url, "/test?page=2&sort=asc");
}
