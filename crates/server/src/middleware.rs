//! Validation and latency middleware.
//!
//! The validation middleware buffers the whole body, runs the matching
//! pipeline against a snapshot of the repository, and either short-circuits
//! with the catalogued error or hands the buffered request to the handler.

use crate::error::protocol_response;
use crate::state::ServerState;
use axum::body::{to_bytes, Body, Bytes};
use axum::extract::{Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Duration;
use validators::query::errors::gateway_timeout;
use validators::RequestContext;

/// Generous body cap; the pipelines themselves enforce protocol limits.
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

pub(crate) fn request_context(parts: &Parts, body: &Bytes) -> RequestContext {
    let headers = parts.headers.iter().map(|(name, value)| {
        (
            name.as_str().to_owned(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        )
    });
    RequestContext::new(
        parts.method.as_str(),
        parts.uri.path(),
        headers,
        body.to_vec(),
    )
}

async fn buffer(request: Request) -> (Parts, Bytes) {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_BODY_BYTES).await.unwrap_or_default();
    (parts, bytes)
}

/// Run the management pipeline before any management handler.
pub async fn validate_services_request(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, bytes) = buffer(request).await;
    let ctx = request_context(&parts, &bytes);
    let databases = state.target_manager.snapshot();
    if let Err(error) = validators::services::run_services_validators(&ctx, &databases) {
        return protocol_response(error);
    }
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Run the query pipeline before the query handler.
pub async fn validate_query_request(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, bytes) = buffer(request).await;
    let ctx = request_context(&parts, &bytes);
    let databases = state.target_manager.snapshot();
    if let Err(error) = validators::query::run_query_validators(&ctx, &databases) {
        return protocol_response(error);
    }
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Simulate network latency.
///
/// When the configured delay exceeds the caller's assumed deadline, fail
/// with the gateway-timeout shape *before* doing any work, so timeout
/// handling under test sees a genuine failure instead of a late success.
pub async fn simulate_latency(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Response {
    let delay = state.config.response_delay_seconds;
    if delay > 0.0 {
        if let Some(timeout) = state.config.client_timeout_seconds {
            if timeout < delay {
                tracing::warn!(delay, timeout, "response delay exceeds caller deadline");
                return protocol_response(gateway_timeout());
            }
        }
        tokio::time::sleep(Duration::from_secs_f64(delay)).await;
    }
    next.run(request).await
}
