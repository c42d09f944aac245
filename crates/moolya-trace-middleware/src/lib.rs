//! Moolya Trace Middleware
//!
//! axum middleware that:
//! - Assigns a trace id to every request (`X-Trace-ID`, reused when sent)
//! - Captures method, URL, client IP, bodies, status and latency
//! - Ships one structured record per request to the collection backend
//!
//! ```ignore
//! let tracer = Tracer::new(TracerConfig::new("http://localhost:3000/logs"))?;
//! let app = Router::new()
//!     .route("/test", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(tracer, trace_middleware));
//! ```

pub mod capture;
pub mod client_ip;
pub mod extract;
pub mod middleware;
pub mod span;
mod tracer;

pub use capture::BodyCapture;
pub use extract::RequestTraceId;
pub use middleware::trace_middleware;
pub use tracer::Tracer;

pub use moolya_trace_core::{
    SeverityLevel, Shipper, TraceId, TracerConfig, API_KEY_HEADER, TRACE_ID_HEADER,
};
