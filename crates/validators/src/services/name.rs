//! Target name checks, including uniqueness among live targets.

use super::{body_object, errors, resolve_database};
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use store::VuforiaDatabase;

pub(super) fn validate_name_type(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(object) = body_object(ctx) else {
        return Ok(());
    };
    match object.get("name") {
        None | Some(serde_json::Value::String(_)) => Ok(()),
        Some(_) => {
            tracing::warn!("the name is not a string");
            Err(errors::fail(400))
        }
    }
}

pub(super) fn validate_name_length(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(name) = name_string(ctx) else {
        return Ok(());
    };
    if !name.is_empty() && name.chars().count() < 65 {
        return Ok(());
    }
    tracing::warn!("the name is not between 1 and 64 characters long");
    Err(errors::fail(400))
}

pub(super) fn validate_name_characters_in_range(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(name) = name_string(ctx) else {
        return Ok(());
    };
    if name.chars().all(|character| (character as u32) <= 0xFFFF) {
        return Ok(());
    }
    tracing::warn!("the name contains characters outside the accepted range");
    // Out-of-range characters crash the real add-target path into its
    // generic error page; other endpoints report a name clash instead.
    if ctx.method == "POST" && ctx.path == "/targets" {
        return Err(errors::oops_error_occurred());
    }
    Err(errors::target_name_exist())
}

pub(super) fn validate_name_does_not_exist_new_target(
    ctx: &RequestContext,
    databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(name) = name_string(ctx) else {
        return Ok(());
    };
    if ctx.target_id().is_some() {
        return Ok(());
    }
    let Some(database) = resolve_database(ctx, databases) else {
        return Ok(());
    };
    if database.name_taken(&name, None) {
        tracing::warn!(name, "the target name already exists");
        return Err(errors::target_name_exist());
    }
    Ok(())
}

pub(super) fn validate_name_does_not_exist_existing_target(
    ctx: &RequestContext,
    databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(name) = name_string(ctx) else {
        return Ok(());
    };
    let Some(target_id) = ctx.target_id() else {
        return Ok(());
    };
    let Some(database) = resolve_database(ctx, databases) else {
        return Ok(());
    };
    if database.name_taken(&name, Some(target_id)) {
        tracing::warn!(name, "the target name belongs to another target");
        return Err(errors::target_name_exist());
    }
    Ok(())
}

fn name_string(ctx: &RequestContext) -> Option<String> {
    let object = body_object(ctx)?;
    match object.get("name") {
        Some(serde_json::Value::String(value)) => Some(value.clone()),
        _ => None,
    }
}
