//! `active_flag`, `width`, and `Content-Type` checks.

use super::{body_object, errors};
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use store::VuforiaDatabase;

pub(super) fn validate_active_flag(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(object) = body_object(ctx) else {
        return Ok(());
    };
    match object.get("active_flag") {
        None | Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(_)) => Ok(()),
        Some(_) => {
            tracing::warn!("the active flag is not a Boolean or NULL");
            Err(errors::fail(400))
        }
    }
}

pub(super) fn validate_width(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(object) = body_object(ctx) else {
        return Ok(());
    };
    let Some(width) = object.get("width") else {
        return Ok(());
    };
    let positive = width.as_f64().is_some_and(|value| value > 0.0);
    if positive {
        return Ok(());
    }
    tracing::warn!("width is not a positive number");
    Err(errors::fail(400))
}

pub(super) fn validate_content_type_header_given(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let needs_content_type = ctx.method == "POST" || ctx.method == "PUT";
    if !needs_content_type || ctx.header("content-type").is_some_and(|value| !value.is_empty()) {
        return Ok(());
    }
    tracing::warn!("no Content-Type header given to a request that requires one");
    Err(errors::authentication_failure())
}
