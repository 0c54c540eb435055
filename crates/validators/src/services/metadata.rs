//! `application_metadata` field checks.

use super::{body_object, errors};
use crate::b64::decode_base64;
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use store::VuforiaDatabase;

const MAX_METADATA_BYTES: usize = 1024 * 1024 - 1;

pub(super) fn validate_metadata_type(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(object) = body_object(ctx) else {
        return Ok(());
    };
    match object.get("application_metadata") {
        None | Some(serde_json::Value::Null) | Some(serde_json::Value::String(_)) => Ok(()),
        Some(_) => {
            tracing::warn!("the application metadata is not a string or NULL");
            Err(errors::fail(400))
        }
    }
}

pub(super) fn validate_metadata_encoding(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(metadata) = metadata_string(ctx) else {
        return Ok(());
    };
    if decode_base64(&metadata).is_err() {
        tracing::warn!("the application metadata is not base64 encoded");
        return Err(errors::fail(422));
    }
    Ok(())
}

pub(super) fn validate_metadata_size(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(metadata) = metadata_string(ctx) else {
        return Ok(());
    };
    let Ok(decoded) = decode_base64(&metadata) else {
        return Ok(());
    };
    if decoded.len() > MAX_METADATA_BYTES {
        tracing::warn!("the application metadata is too large");
        return Err(errors::metadata_too_large());
    }
    Ok(())
}

fn metadata_string(ctx: &RequestContext) -> Option<String> {
    let object = body_object(ctx)?;
    match object.get("application_metadata") {
        Some(serde_json::Value::String(value)) => Some(value.clone()),
        _ => None,
    }
}
