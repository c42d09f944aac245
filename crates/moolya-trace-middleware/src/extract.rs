//! Handler-side access to the request's trace id

use axum::extract::FromRequestParts;
use http::request::Parts;
use moolya_trace_core::{context, TraceId};
use std::convert::Infallible;

/// Trace id extractor for handlers.
///
/// Never rejects: on a request the middleware did not see, the id is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTraceId(pub TraceId);

impl<S> FromRequestParts<S> for RequestTraceId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(context::get_or_empty(&parts.extensions)))
    }
}
