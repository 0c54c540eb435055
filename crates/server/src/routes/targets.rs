//! Target CRUD handlers.

use super::{into_context, json_response, resolve_server_database, sorted_targets, stale_database_response};
use crate::error::protocol_response;
use crate::state::ServerState;
use axum::extract::{Path, Request, State};
use axum::response::Response;
use chrono::Utc;
use serde::Serialize;
use store::{random_hex, NewTarget, StoreError, TargetUpdate};
use validators::b64::decode_base64;
use validators::services::errors;
use validators::ResultCode;

#[derive(Debug, Serialize)]
struct AddTargetResponse {
    transaction_id: String,
    result_code: &'static str,
    target_id: String,
}

#[derive(Debug, Serialize)]
struct TransactionResponse {
    transaction_id: String,
    result_code: &'static str,
}

#[derive(Debug, Serialize)]
struct TargetRecord {
    target_id: String,
    active_flag: bool,
    name: String,
    width: f64,
    tracking_rating: i32,
    reco_rating: String,
}

#[derive(Debug, Serialize)]
struct GetTargetResponse {
    result_code: &'static str,
    transaction_id: String,
    target_record: TargetRecord,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct TargetListResponse {
    transaction_id: String,
    result_code: &'static str,
    results: Vec<String>,
}

#[derive(Debug, Serialize)]
struct UpdateTargetResponse {
    result_code: &'static str,
    transaction_id: String,
}

fn body_json(body: &[u8]) -> serde_json::Map<String, serde_json::Value> {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.as_object().cloned())
        .unwrap_or_default()
}

/// `POST /targets`
pub async fn add_target(State(state): State<ServerState>, request: Request) -> Response {
    let ctx = into_context(request).await;
    let Some(database) = resolve_server_database(&state, &ctx) else {
        return stale_database_response();
    };
    let json = body_json(&ctx.body);

    let name = json
        .get("name")
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_owned();
    let width = json
        .get("width")
        .and_then(serde_json::Value::as_f64)
        .unwrap_or_default();
    let image_value = json
        .get("image")
        .and_then(|value| value.as_str())
        .and_then(|encoded| decode_base64(encoded).ok())
        .unwrap_or_default();
    // An explicit null active flag means "use the default".
    let active_flag = json
        .get("active_flag")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(true);
    let application_metadata = json
        .get("application_metadata")
        .and_then(|value| value.as_str())
        .map(str::to_owned);

    let new_target = NewTarget {
        name,
        width,
        image_value,
        active_flag,
        application_metadata,
        processing_time_seconds: state.config.processing_time_seconds,
    };
    match state
        .target_manager
        .add_target(&database.database_name, new_target, Utc::now())
    {
        Ok(target) => {
            let body = AddTargetResponse {
                transaction_id: random_hex(),
                result_code: ResultCode::TargetCreated.as_str(),
                target_id: target.target_id,
            };
            json_response(201, serde_json::to_string(&body).unwrap_or_default())
        }
        Err(StoreError::TargetNameExists(_)) => protocol_response(errors::target_name_exist()),
        Err(_) => stale_database_response(),
    }
}

/// `GET /targets/{target_id}`
pub async fn get_target(
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
    let body = GetTargetResponse {
        result_code: ResultCode::Success.as_str(),
        transaction_id: random_hex(),
        target_record: TargetRecord {
            target_id: target.target_id.clone(),
            active_flag: target.active_flag,
            name: target.name.clone(),
            width: target.width,
            tracking_rating: target.tracking_rating(now),
            reco_rating: String::new(),
        },
        status: target.status(now).as_str(),
    };
    json_response(200, serde_json::to_string(&body).unwrap_or_default())
}

/// `DELETE /targets/{target_id}`
pub async fn delete_target(
    State(state): State<ServerState>,
    Path(target_id): Path<String>,
    request: Request,
) -> Response {
    let ctx = into_context(request).await;
    let Some(database) = resolve_server_database(&state, &ctx) else {
        return stale_database_response();
    };
    match state
        .target_manager
        .delete_target(&database.database_name, &target_id, Utc::now())
    {
        Ok(_) => {
            let body = TransactionResponse {
                transaction_id: random_hex(),
                result_code: ResultCode::Success.as_str(),
            };
            json_response(200, serde_json::to_string(&body).unwrap_or_default())
        }
        Err(StoreError::TargetStatusProcessing) => {
            protocol_response(errors::target_status_processing())
        }
        Err(StoreError::UnknownTarget(_)) => protocol_response(errors::unknown_target()),
        Err(_) => stale_database_response(),
    }
}

/// `PUT /targets/{target_id}`
pub async fn update_target(
    State(state): State<ServerState>,
    Path(target_id): Path<String>,
    request: Request,
) -> Response {
    let ctx = into_context(request).await;
    let Some(database) = resolve_server_database(&state, &ctx) else {
        return stale_database_response();
    };
    let json = body_json(&ctx.body);

    // Null is type-valid for these fields but unusable as an update value.
    if json
        .get("active_flag")
        .is_some_and(serde_json::Value::is_null)
    {
        tracing::warn!("the active flag in an update was null");
        return protocol_response(errors::fail(400));
    }
    if json
        .get("application_metadata")
        .is_some_and(serde_json::Value::is_null)
    {
        tracing::warn!("the application metadata in an update was null");
        return protocol_response(errors::fail(400));
    }

    let update = TargetUpdate {
        name: json
            .get("name")
            .and_then(|value| value.as_str())
            .map(str::to_owned),
        width: json.get("width").and_then(serde_json::Value::as_f64),
        image_value: json
            .get("image")
            .and_then(|value| value.as_str())
            .and_then(|encoded| decode_base64(encoded).ok()),
        active_flag: json
            .get("active_flag")
            .and_then(serde_json::Value::as_bool),
        application_metadata: json
            .get("application_metadata")
            .and_then(|value| value.as_str())
            .map(str::to_owned),
    };
    match state
        .target_manager
        .update_target(&database.database_name, &target_id, update, Utc::now())
    {
        Ok(_) => {
            let body = UpdateTargetResponse {
                result_code: ResultCode::Success.as_str(),
                transaction_id: random_hex(),
            };
            json_response(200, serde_json::to_string(&body).unwrap_or_default())
        }
        Err(StoreError::TargetStatusNotSuccess) => {
            protocol_response(errors::target_status_not_success())
        }
        Err(StoreError::TargetNameExists(_)) => protocol_response(errors::target_name_exist()),
        Err(StoreError::UnknownTarget(_)) => protocol_response(errors::unknown_target()),
        Err(_) => stale_database_response(),
    }
}

/// `GET /targets`
pub async fn target_list(State(state): State<ServerState>, request: Request) -> Response {
    let ctx = into_context(request).await;
    let Some(database) = resolve_server_database(&state, &ctx) else {
        return stale_database_response();
    };
    let results = sorted_targets(&database)
        .into_iter()
        .filter(|target| !target.is_deleted())
        .map(|target| target.target_id.clone())
        .collect();
    let body = TargetListResponse {
        transaction_id: random_hex(),
        result_code: ResultCode::Success.as_str(),
        results,
    };
    json_response(200, serde_json::to_string(&body).unwrap_or_default())
}
