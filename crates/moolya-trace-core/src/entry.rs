//! Log records shipped to the collection backend
//!
//! `LogEntry` is the per-request record built by the interceptor.
//! `CustomLogEntry` is an application-emitted line correlated by trace id.

use chrono::{SecondsFormat, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::level::SeverityLevel;
use crate::trace_id::TraceId;

/// Request-side fields captured before the handler runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    pub trace_id: TraceId,
    pub method: String,
    pub url: String,
    pub client_ip: String,
    /// Raw request body, already capped to the configured capture size
    pub body: Vec<u8>,
}

/// Structured record for one handled request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub trace_id: TraceId,
    pub method: String,
    pub url: String,
    pub status_code: u16,
    pub client_ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
    pub latency: String,
    pub timestamp: String,
    pub level: SeverityLevel,
}

impl LogEntry {
    pub fn new(
        request: CapturedRequest,
        status: StatusCode,
        response_body: &[u8],
        latency: Duration,
        level: SeverityLevel,
    ) -> Self {
        Self {
            trace_id: request.trace_id,
            method: request.method,
            url: request.url,
            status_code: status.as_u16(),
            client_ip: request.client_ip,
            request_body: body_text(&request.body),
            response_body: body_text(response_body),
            latency: format_latency(latency),
            timestamp: now_rfc3339(),
            level,
        }
    }

    /// Copy of this record carrying a different severity
    pub fn with_level(self, level: SeverityLevel) -> Self {
        Self { level, ..self }
    }
}

/// Application log line correlated with a request's trace id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLogEntry {
    pub trace_id: TraceId,
    pub level: SeverityLevel,
    pub message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub details: String,
    pub timestamp: String,
}

impl CustomLogEntry {
    pub fn new(
        trace_id: TraceId,
        level: SeverityLevel,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            trace_id,
            level,
            message: message.into(),
            details: details.into(),
            timestamp: now_rfc3339(),
        }
    }
}

/// Decode a captured body for the record; empty bodies are omitted
fn body_text(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Render latency as text, e.g. `1.5ms` or `250µs`
pub fn format_latency(latency: Duration) -> String {
    format!("{:?}", latency)
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
