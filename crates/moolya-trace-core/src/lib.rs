//! # Moolya Trace Core
//!
//! Framework-independent pieces of the request tracer.
//!
//! ## Modules
//!
//! - `trace_id` - Trace identifier generation
//! - `context` - Request-scoped trace id storage
//! - `level` - Severity levels attached to shipped records
//! - `entry` - Log record construction
//! - `config` - Tracer configuration
//! - `shipper` - Backend log shipping over HTTP
//! - `error` - Configuration and shipping errors

pub mod config;
pub mod context;
pub mod entry;
pub mod error;
pub mod level;
pub mod shipper;
pub mod trace_id;

pub use config::TracerConfig;
pub use entry::{CapturedRequest, CustomLogEntry, LogEntry};
pub use error::{ConfigError, ShipError};
pub use level::SeverityLevel;
pub use shipper::Shipper;
pub use trace_id::TraceId;

use http::HeaderName;

/// `X-Trace-ID`: carries the trace id on inbound requests and outbound responses
pub const TRACE_ID_HEADER: HeaderName = HeaderName::from_static("x-trace-id");

/// `X-Moolya-API-Key`: carries the API key on calls to the collection backend
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-moolya-api-key");
