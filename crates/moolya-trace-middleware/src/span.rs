//! Request span - structured local logging for traced requests
//!
//! Every traced request runs inside a `request` span so that anything the
//! handler logs carries the same `trace_id` as the shipped record.

use http::{Method, StatusCode};
use moolya_trace_core::TraceId;
use std::time::Duration;
use tracing::{debug, info_span, Span};

/// Request span builder for structured logging
pub struct RequestSpan;

impl RequestSpan {
    /// Create a root span for an incoming request.
    ///
    /// No parent, so spans don't accumulate across keep-alive requests.
    pub fn enter(trace_id: &TraceId, method: &Method, path: &str) -> Span {
        info_span!(
            parent: None,
            "request",
            trace_id = %trace_id,
            method = %method,
            path = %path,
        )
    }

    /// Log request entry (single consolidated line)
    pub fn log_entry(trace_id: &TraceId, method: &Method, path: &str) {
        debug!(trace_id = %trace_id, "→ {} {}", method, path);
    }

    /// Log request completion (single consolidated line)
    pub fn log_exit(trace_id: &TraceId, status: StatusCode, latency: Duration) {
        debug!(
            trace_id = %trace_id,
            "← {} ({}ms)",
            status.as_u16(),
            latency.as_millis()
        );
    }
}
