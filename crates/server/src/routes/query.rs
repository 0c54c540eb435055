//! The image recognition query.

use super::{into_context, json_response, resolve_client_database, sorted_targets};
use crate::error::protocol_response;
use crate::state::ServerState;
use axum::extract::{Request, State};
use axum::response::Response;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{TimeDelta, Utc};
use serde::Serialize;
use store::{random_hex, Target, TargetStatus};
use validators::b64::decode_base64;
use validators::multipart::{field, text_field_or};
use validators::query::errors::{authentication_failure, match_processing};
use validators::query::parsed_fields;
use validators::ResultCode;

#[derive(Debug, Serialize)]
struct QueryResponse {
    result_code: &'static str,
    results: Vec<serde_json::Value>,
    query_id: String,
}

/// `POST /v1/query`
///
/// Matching targets fall into three buckets:
///
/// - live, active, successfully processed targets become results;
/// - targets still processing force the transient 500, because the real
///   service is inconsistent about them and the emulator picks the loud,
///   reproducible behavior;
/// - recently deleted active targets force the same transient 500 for the
///   configured recognition window, emulating the service's
///   eventual-consistency lag after a delete.
pub async fn query(State(state): State<ServerState>, request: Request) -> Response {
    let ctx = into_context(request).await;
    let Some(database) = resolve_client_database(&state, &ctx) else {
        return protocol_response(authentication_failure());
    };
    let fields = parsed_fields(&ctx);

    let max_num_results = text_field_or(&fields, "max_num_results", "1")
        .parse::<usize>()
        .unwrap_or(1);
    let include_target_data = text_field_or(&fields, "include_target_data", "top").to_lowercase();
    let image_value = field(&fields, "image")
        .map(|field| field.value.clone())
        .unwrap_or_default();

    let now = Utc::now();
    let recognition_window = TimeDelta::milliseconds(
        (state.config.query_recognizes_deletion_seconds * 1000.0) as i64,
    );

    let matching: Vec<&Target> = sorted_targets(&database)
        .into_iter()
        .filter(|target| state.query_matcher.matches(&target.image_value, &image_value))
        .collect();

    for target in &matching {
        if target.status(now) == TargetStatus::Processing {
            tracing::info!(target_id = %target.target_id, "query matched a processing target");
            return protocol_response(match_processing());
        }
        if target.active_flag {
            if let Some(delete_date) = target.delete_date {
                if now - delete_date < recognition_window {
                    tracing::info!(
                        target_id = %target.target_id,
                        "query matched a target inside the deletion recognition window"
                    );
                    return protocol_response(match_processing());
                }
            }
        }
    }

    let mut results = Vec::new();
    for target in matching {
        if target.is_deleted()
            || !target.active_flag
            || target.status(now) != TargetStatus::Success
        {
            continue;
        }
        let with_data = match include_target_data.as_str() {
            "all" => true,
            "top" => results.is_empty(),
            _ => false,
        };
        results.push(result_entry(target, with_data));
    }
    results.truncate(max_num_results);

    let body = QueryResponse {
        result_code: ResultCode::Success.as_str(),
        results,
        query_id: random_hex(),
    };
    json_response(200, serde_json::to_string(&body).unwrap_or_default())
}

fn result_entry(target: &Target, with_data: bool) -> serde_json::Value {
    if !with_data {
        return serde_json::json!({ "target_id": target.target_id });
    }
    // Metadata is re-encoded the way the service stores it, not echoed
    // verbatim.
    let application_metadata = target
        .application_metadata
        .as_deref()
        .and_then(|metadata| decode_base64(metadata).ok())
        .map(|decoded| BASE64.encode(decoded));
    serde_json::json!({
        "target_id": target.target_id,
        "target_data": {
            "target_timestamp": target.last_modified_date.timestamp(),
            "name": target.name,
            "application_metadata": application_metadata,
        },
    })
}
