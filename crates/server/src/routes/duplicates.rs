//! Duplicate detection.

use super::{into_context, json_response, resolve_server_database, sorted_targets, stale_database_response};
use crate::error::protocol_response;
use crate::state::ServerState;
use axum::extract::{Path, Request, State};
use axum::response::Response;
use chrono::Utc;
use serde::Serialize;
use store::{random_hex, TargetStatus};
use validators::services::errors;
use validators::ResultCode;

#[derive(Debug, Serialize)]
struct DuplicatesResponse {
    transaction_id: String,
    result_code: &'static str,
    similar_targets: Vec<String>,
}

/// `GET /duplicates/{target_id}`
///
/// Other live, active targets whose image the configured matcher considers
/// the same. Processing targets are never reported, and a failed target on
/// either side of the comparison suppresses the pair.
pub async fn get_duplicates(
    State(state): State<ServerState>,
    Path(target_id): Path<String>,
    request: Request,
) -> Response {
    let ctx = into_context(request).await;
    let Some(database) = resolve_server_database(&state, &ctx) else {
        return stale_database_response();
    };
    let Some(target) = database.target(&target_id) else {
        return protocol_response(errors::unknown_target());
    };
    let now = Utc::now();
    let target_status = target.status(now);

    let similar_targets: Vec<String> = sorted_targets(&database)
        .into_iter()
        .filter(|other| other.target_id != target.target_id)
        .filter(|other| !other.is_deleted())
        .filter(|other| other.active_flag)
        .filter(|other| {
            let other_status = other.status(now);
            other_status != TargetStatus::Processing
                && other_status != TargetStatus::Failed
                && target_status != TargetStatus::Failed
        })
        .filter(|other| {
            state
                .duplicates_matcher
                .matches(&other.image_value, &target.image_value)
        })
        .map(|other| other.target_id.clone())
        .collect();

    let body = DuplicatesResponse {
        transaction_id: random_hex(),
        result_code: ResultCode::Success.as_str(),
        similar_targets,
    };
    json_response(200, serde_json::to_string(&body).unwrap_or_default())
}
