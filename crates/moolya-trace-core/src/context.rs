//! Request-scoped trace id storage
//!
//! The trace id rides along in the request's `http::Extensions`, so it lives
//! exactly as long as the request and is never shared between requests.

use http::Extensions;

use crate::trace_id::TraceId;

/// Store the trace id for the current request, replacing any previous one
pub fn set(extensions: &mut Extensions, trace_id: TraceId) {
    extensions.insert(trace_id);
}

/// Fetch the trace id for the current request, if one was stored
pub fn get(extensions: &Extensions) -> Option<TraceId> {
    extensions.get::<TraceId>().cloned()
}

/// Like [`get`], but yields an empty id instead of `None`
pub fn get_or_empty(extensions: &Extensions) -> TraceId {
    get(extensions).unwrap_or_default()
}
