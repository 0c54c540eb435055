//! Endpoint handlers.
//!
//! Handlers run only after the validation middleware has passed, so they
//! can assume the request is one the real service would accept. Anything
//! they still reject (state conflicts, races on name uniqueness) uses the
//! same catalogued error shapes as the pipeline.

pub mod duplicates;
pub mod query;
pub mod summary;
pub mod targets;

use crate::middleware::request_context;
use crate::state::ServerState;
use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::response::Response;
use store::{Target, VuforiaDatabase};
use validators::{rfc1123_date, RequestContext};

/// Rebuild the validator-style view of an already-buffered request.
pub(crate) async fn into_context(request: Request) -> RequestContext {
    let (parts, body) = request.into_parts();
    // The validation middleware already buffered the body; this read is
    // from memory.
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    request_context(&parts, &bytes)
}

/// The database whose server keys signed this request.
pub(crate) fn resolve_server_database(
    state: &ServerState,
    ctx: &RequestContext,
) -> Option<VuforiaDatabase> {
    let databases = state.target_manager.snapshot();
    auth::get_database_matching_server_keys(
        &databases,
        ctx.header("authorization"),
        &ctx.method,
        &ctx.body,
        ctx.header("content-type").unwrap_or_default(),
        ctx.header("date").unwrap_or_default(),
        &ctx.path,
    )
    .cloned()
}

/// The database whose client keys signed this request.
pub(crate) fn resolve_client_database(
    state: &ServerState,
    ctx: &RequestContext,
) -> Option<VuforiaDatabase> {
    let databases = state.target_manager.snapshot();
    auth::get_database_matching_client_keys(
        &databases,
        ctx.header("authorization"),
        &ctx.method,
        &ctx.body,
        ctx.header("content-type").unwrap_or_default(),
        ctx.header("date").unwrap_or_default(),
        &ctx.path,
    )
    .cloned()
}

/// A success response with the service's standard header set.
pub(crate) fn json_response(status: u16, body: String) -> Response {
    let builder = axum::http::Response::builder()
        .status(status)
        .header("Connection", "keep-alive")
        .header("Content-Type", "application/json")
        .header("Server", "nginx")
        .header("Date", rfc1123_date())
        .header("Content-Length", body.len().to_string());
    builder
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}

/// An authentication failure that should be unreachable: the pipeline has
/// already resolved the database once. Races with database removal land
/// here.
pub(crate) fn stale_database_response() -> Response {
    crate::error::protocol_response(validators::services::errors::authentication_failure())
}

/// Targets in a stable upload order; map iteration alone is unordered.
pub(crate) fn sorted_targets(database: &VuforiaDatabase) -> Vec<&Target> {
    let mut targets: Vec<&Target> = database.targets.values().collect();
    targets.sort_by(|a, b| {
        a.upload_date
            .cmp(&b.upload_date)
            .then_with(|| a.target_id.cmp(&b.target_id))
    });
    targets
}
