//! Per-request correlation ids and the `http_request` span.
//!
//! Every request runs inside a span tagged with a correlation id, so resolver,
//! audit and store logs for one download can be joined. The id is echoed back
//! in the `X-Correlation-ID` response header.

use axum::{
    extract::Request,
    http::{header::HeaderValue, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

const TRACEPARENT_HEADER: &str = "traceparent";

/// Correlation id attached to request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Pick the id for a request: an explicit `X-Correlation-ID`, then the
    /// trace id of a well-formed W3C `traceparent`, then a fresh UUID.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let explicit = headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if let Some(id) = explicit {
            return Self(id.to_string());
        }

        headers
            .get(TRACEPARENT_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(trace_id)
            .map(|id| Self(id.to_string()))
            .unwrap_or_else(|| Self(Uuid::new_v4().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trace id of `version-traceid-parentid-flags`; 32 hex digits, not all zero.
fn trace_id(traceparent: &str) -> Option<&str> {
    let id = traceparent.split('-').nth(1)?;
    let well_formed = id.len() == 32
        && id.bytes().all(|b| b.is_ascii_hexdigit())
        && id.bytes().any(|b| b != b'0');
    well_formed.then_some(id)
}

pub async fn correlation_id_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id = CorrelationId::from_headers(request.headers());
    request.extensions_mut().insert(correlation_id.clone());

    let span = tracing::info_span!(
        "http_request",
        correlation_id = %correlation_id,
        method = %request.method(),
        uri = %request.uri().path(),
    );

    async move {
        let mut response = next.run(request).await;

        if let Ok(value) = HeaderValue::from_str(correlation_id.as_str()) {
            response.headers_mut().insert(CORRELATION_ID_HEADER, value);
        }
        tracing::debug!(status = response.status().as_u16(), "Request completed");

        response
    }
    .instrument(span)
    .await
}
