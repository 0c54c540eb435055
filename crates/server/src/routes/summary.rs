//! Database and target summary reports.

use super::{into_context, json_response, resolve_server_database, stale_database_response};
use crate::error::protocol_response;
use crate::state::ServerState;
use axum::extract::{Path, Request, State};
use axum::response::Response;
use chrono::Utc;
use serde::Serialize;
use store::{random_hex, TargetStatus, VuforiaDatabase};
use validators::services::errors;
use validators::ResultCode;

#[derive(Debug, Serialize)]
struct DatabaseSummaryResponse {
    result_code: &'static str,
    transaction_id: String,
    name: String,
    active_images: usize,
    inactive_images: usize,
    failed_images: usize,
    target_quota: u32,
    total_recos: u32,
    current_month_recos: u32,
    previous_month_recos: u32,
    processing_images: usize,
    reco_threshold: u32,
    request_quota: u32,
    // The real service always reports zero usage, even under load.
    request_usage: u32,
}

#[derive(Debug, Serialize)]
struct TargetSummaryResponse {
    status: &'static str,
    transaction_id: String,
    result_code: &'static str,
    database_name: String,
    target_name: String,
    upload_date: String,
    active_flag: bool,
    tracking_rating: i32,
    total_recos: u32,
    current_month_recos: u32,
    previous_month_recos: u32,
}

/// `GET /summary`
pub async fn database_summary(State(state): State<ServerState>, request: Request) -> Response {
    let ctx = into_context(request).await;
    let Some(database) = resolve_server_database(&state, &ctx) else {
        return stale_database_response();
    };
    let now = Utc::now();
    let active_images = database
        .not_deleted_targets()
        .filter(|target| target.status(now) == TargetStatus::Success && target.active_flag)
        .count();
    let inactive_images = database
        .not_deleted_targets()
        .filter(|target| target.status(now) == TargetStatus::Success && !target.active_flag)
        .count();
    let failed_images = database.count_with_status(TargetStatus::Failed, now);
    let processing_images = database.count_with_status(TargetStatus::Processing, now);

    let body = DatabaseSummaryResponse {
        result_code: ResultCode::Success.as_str(),
        transaction_id: random_hex(),
        name: database.database_name.clone(),
        active_images,
        inactive_images,
        failed_images,
        target_quota: VuforiaDatabase::TARGET_QUOTA,
        total_recos: 0,
        current_month_recos: 0,
        previous_month_recos: 0,
        processing_images,
        reco_threshold: VuforiaDatabase::RECO_THRESHOLD,
        request_quota: VuforiaDatabase::REQUEST_QUOTA,
        request_usage: 0,
    };
    json_response(200, serde_json::to_string(&body).unwrap_or_default())
}

/// `GET /summary/{target_id}`
pub async fn target_summary(
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
    let body = TargetSummaryResponse {
        status: target.status(now).as_str(),
        transaction_id: random_hex(),
        result_code: ResultCode::Success.as_str(),
        database_name: database.database_name.clone(),
        target_name: target.name.clone(),
        upload_date: target.upload_date.format("%Y-%m-%d").to_string(),
        active_flag: target.active_flag,
        tracking_rating: target.tracking_rating(now),
        total_recos: 0,
        current_month_recos: 0,
        previous_month_recos: 0,
    };
    json_response(200, serde_json::to_string(&body).unwrap_or_default())
}
