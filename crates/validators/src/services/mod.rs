//! The management API's ordered validation pipeline.
//!
//! Steps run in the order of [`SERVICES_PIPELINE`]; the first failure wins.
//! Moving an entry changes which error a doubly-malformed request gets, so
//! the slice itself is the contract, not an implementation detail.

pub mod errors;

mod auth;
mod content_length;
mod database;
mod date;
mod fields;
mod image;
mod json;
mod name;
mod metadata;

use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use store::VuforiaDatabase;

type Step = fn(&RequestContext, &[VuforiaDatabase]) -> Result<(), ErrorResponse>;

/// Every management-API check, in contract order: transport shape first,
/// then authentication, then state, then body syntax, then fields, with the
/// date checks last.
const SERVICES_PIPELINE: &[Step] = &[
    content_length::validate_content_length_header_is_int,
    content_length::validate_content_length_header_not_too_large,
    content_length::validate_content_length_header_not_too_small,
    auth::validate_auth_header_exists,
    auth::validate_auth_header_has_signature,
    auth::validate_access_key_exists,
    auth::validate_authorization,
    database::validate_project_state,
    database::validate_target_id_exists,
    json::validate_json,
    json::validate_keys,
    metadata::validate_metadata_type,
    metadata::validate_metadata_encoding,
    metadata::validate_metadata_size,
    fields::validate_active_flag,
    image::validate_image_data_type,
    image::validate_image_encoding,
    image::validate_image_is_image,
    image::validate_image_format,
    image::validate_image_color_space,
    image::validate_image_size,
    name::validate_name_type,
    name::validate_name_length,
    name::validate_name_characters_in_range,
    name::validate_name_does_not_exist_new_target,
    name::validate_name_does_not_exist_existing_target,
    fields::validate_width,
    fields::validate_content_type_header_given,
    date::validate_date_header_given,
    date::validate_date_format,
    date::validate_date_in_range,
];

/// Run the management pipeline against one request.
pub fn run_services_validators(
    ctx: &RequestContext,
    databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    for step in SERVICES_PIPELINE {
        step(ctx, databases)?;
    }
    Ok(())
}

/// The database whose server keys signed this request, if any.
pub(crate) fn resolve_database<'a>(
    ctx: &RequestContext,
    databases: &'a [VuforiaDatabase],
) -> Option<&'a VuforiaDatabase> {
    auth::resolve_database(ctx, databases)
}

/// The request body parsed as a JSON object, when it is one.
///
/// Field steps run after the syntax step, so a parse failure here simply
/// means "nothing to check".
pub(crate) fn body_object(ctx: &RequestContext) -> Option<serde_json::Map<String, serde_json::Value>> {
    if ctx.body.is_empty() {
        return None;
    }
    match serde_json::from_slice::<serde_json::Value>(&ctx.body) {
        Ok(serde_json::Value::Object(object)) => Some(object),
        _ => None,
    }
}
