//! Traced router behind a real listener

use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};
use tests::app::{serve, test_router};
use tests::{fixtures, SeverityLevel, TestBackend};

const BACKEND_DELAY: Duration = Duration::from_millis(300);

#[tokio::test]
async fn record_ships_before_response_is_sent() {
    let backend = TestBackend::with_delay(BACKEND_DELAY).await;
    let addr = serve(test_router(fixtures::tracer(&backend.url()))).await;

    let started = Instant::now();
    let response = reqwest::get(format!("http://{}/test", addr)).await.unwrap();
    let status = response.status();
    let trace_id = response
        .headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap();
    let body = response.text().await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(status.as_u16(), 200);
    assert_eq!(body, r#"{"message":"Hello, World!"}"#);
    // The server held the response until the backend answered
    assert!(
        elapsed >= BACKEND_DELAY,
        "response arrived after {:?}, before the backend finished",
        elapsed
    );

    let entry = backend.only_entry().await;
    assert_eq!(entry.trace_id.as_str(), trace_id);
    assert_eq!(entry.status_code, 200);
    assert_eq!(entry.level, SeverityLevel::Info);
    assert_eq!(
        entry.response_body.as_deref(),
        Some(r#"{"message":"Hello, World!"}"#)
    );
}

#[tokio::test]
async fn error_response_ships_before_response_is_sent() {
    let backend = TestBackend::with_delay(BACKEND_DELAY).await;
    let addr = serve(test_router(fixtures::tracer(&backend.url()))).await;

    let started = Instant::now();
    let response = reqwest::Client::new()
        .put(format!("http://{}/test", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
    response.bytes().await.unwrap();
    assert!(started.elapsed() >= BACKEND_DELAY);

    let entry = backend.only_entry().await;
    assert_eq!(entry.status_code, 401);
    assert_eq!(entry.level, SeverityLevel::Error);
}

#[tokio::test]
async fn request_body_and_peer_address_over_the_wire() {
    let backend = TestBackend::start().await;
    let addr = serve(test_router(fixtures::tracer(&backend.url()))).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/echo", addr))
        .body("over the wire")
        .send()
        .await
        .unwrap();
    assert_eq!(response.text().await.unwrap(), "over the wire");

    let entry = backend.only_entry().await;
    assert_eq!(entry.method, "POST");
    assert_eq!(entry.url, "/echo");
    assert_eq!(entry.client_ip, "127.0.0.1");
    assert_eq!(entry.request_body.as_deref(), Some("over the wire"));
    assert_eq!(entry.response_body.as_deref(), Some("over the wire"));
}

#[tokio::test]
async fn unreachable_backend_still_serves_client() {
    let addr = serve(test_router(fixtures::tracer(fixtures::UNREACHABLE_BACKEND))).await;

    let response = reqwest::get(format!("http://{}/test", addr)).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.headers().contains_key("x-trace-id"));
    assert_eq!(
        response.text().await.unwrap(),
        r#"{"message":"Hello, World!"}"#
    );
}
