//! Request/response tracing middleware
//!
//! Resolves the trace id, captures request metadata and body, runs the
//! downstream handler, buffers the response body, then ships the finished
//! record before the response is handed back to the server.

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use futures::{future, stream};
use http_body_util::BodyExt;
use moolya_trace_core::{
    context, CapturedRequest, LogEntry, SeverityLevel, TraceId, TRACE_ID_HEADER,
};
use std::time::Instant;
use tracing::{debug, warn, Instrument};

use crate::capture::BodyCapture;
use crate::client_ip;
use crate::span::RequestSpan;
use crate::tracer::Tracer;

/// Trace id sent by the client, if any
fn inbound_trace_id(headers: &HeaderMap) -> Option<TraceId> {
    headers
        .get(TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(TraceId::from_inbound)
}

/// Read the whole request body; a failed read yields an empty body
async fn read_body(body: Body, trace_id: &TraceId) -> Bytes {
    match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            debug!(trace_id = %trace_id, "Failed to read request body: {}", e);
            Bytes::new()
        }
    }
}

/// Buffer the response body, keeping a bounded copy for the record.
///
/// A body that fails mid-stream is handed back as a body yielding the same
/// error, so the client still sees the failure.
async fn buffer_response(body: Body, limit: usize, trace_id: &TraceId) -> (Body, BodyCapture) {
    let mut capture = BodyCapture::new(limit);
    match body.collect().await {
        Ok(collected) => {
            let bytes = collected.to_bytes();
            capture.push(&bytes);
            (Body::from(bytes), capture)
        }
        Err(e) => {
            warn!(trace_id = %trace_id, "[Tracer] Response body failed: {}", e);
            let failed = stream::once(future::ready(Err::<Bytes, _>(e)));
            (Body::from_stream(failed), capture)
        }
    }
}

/// Tracing middleware for requests and responses.
///
/// Install with `axum::middleware::from_fn_with_state(tracer, trace_middleware)`.
/// The record is shipped on the request's own task before the response is
/// returned. The caller's response is never affected by how shipping turns out.
pub async fn trace_middleware(
    State(tracer): State<Tracer>,
    request: Request,
    next: Next,
) -> Response {
    let trace_id = inbound_trace_id(request.headers()).unwrap_or_else(TraceId::generate);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = RequestSpan::enter(&trace_id, &method, &path);

    async move {
        RequestSpan::log_entry(&trace_id, &method, &path);

        let config = tracer.config();
        let (mut parts, body) = request.into_parts();
        context::set(&mut parts.extensions, trace_id.clone());
        let client_ip = client_ip::resolve(&parts, config.trust_forwarded_headers);

        // Keep a bounded copy for the record, replay the full body downstream
        let body_bytes = read_body(body, &trace_id).await;
        let mut request_capture = BodyCapture::new(config.max_body_capture);
        request_capture.push(&body_bytes);

        let captured = CapturedRequest {
            trace_id: trace_id.clone(),
            method: method.to_string(),
            url: parts.uri.to_string(),
            client_ip,
            body: request_capture.into_bytes(),
        };

        let request = Request::from_parts(parts, Body::from(body_bytes));
        let started = Instant::now();

        let response = next.run(request).await;

        let (mut parts, body) = response.into_parts();
        let (body, response_capture) =
            buffer_response(body, config.max_body_capture, &trace_id).await;
        let latency = started.elapsed();

        RequestSpan::log_exit(&trace_id, parts.status, latency);
        if response_capture.is_truncated() {
            debug!(
                trace_id = %trace_id,
                captured = response_capture.as_bytes().len(),
                total = response_capture.total_len(),
                "Response body truncated for log record"
            );
        }

        let level = SeverityLevel::from_status(parts.status);
        let entry = LogEntry::new(
            captured,
            parts.status,
            response_capture.as_bytes(),
            latency,
            level,
        );
        tracer.shipper().ship(level, entry).await;

        if let Ok(value) = HeaderValue::from_str(trace_id.as_str()) {
            parts.headers.insert(TRACE_ID_HEADER, value);
        }

        Response::from_parts(parts, body)
    }
    .instrument(span)
    .await
}
