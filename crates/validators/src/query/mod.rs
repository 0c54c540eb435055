//! The query API's ordered validation pipeline.

pub mod errors;

mod accept;
mod auth;
mod content_length;
mod content_type;
mod date;
mod fields;
mod image;
mod num_results;
mod project_state;
mod target_data;

use crate::multipart::{parse_multipart, MultipartField};
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use store::VuforiaDatabase;

type Step = fn(&RequestContext, &[VuforiaDatabase]) -> Result<(), ErrorResponse>;

/// Every query-API check, in contract order.
const QUERY_PIPELINE: &[Step] = &[
    content_length::validate_content_length_header_is_int,
    content_length::validate_content_length_header_not_too_large,
    content_length::validate_content_length_header_not_too_small,
    auth::validate_auth_header_exists,
    auth::validate_auth_header_number_of_parts,
    auth::validate_auth_header_has_signature,
    auth::validate_client_key_exists,
    auth::validate_authorization,
    project_state::validate_project_state,
    accept::validate_accept_header,
    content_type::validate_content_type_header,
    fields::validate_extra_fields,
    image::validate_image_field_given,
    image::validate_image_is_image,
    image::validate_image_format,
    image::validate_image_dimensions,
    image::validate_image_file_size,
    num_results::validate_max_num_results,
    target_data::validate_include_target_data,
    date::validate_date_header_given,
    date::validate_date_format,
    date::validate_date_in_range,
];

/// Run the query pipeline against one request.
pub fn run_query_validators(
    ctx: &RequestContext,
    databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    for step in QUERY_PIPELINE {
        step(ctx, databases)?;
    }
    Ok(())
}

/// The boundary parameter of the request's `Content-Type`, if any.
pub fn boundary(ctx: &RequestContext) -> Option<String> {
    let content_type = ctx.header("content-type")?;
    let (_main, params) = content_type.split_once(';')?;
    for param in params.split(';') {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        if key.trim().eq_ignore_ascii_case("boundary") {
            return Some(value.trim().trim_matches('"').to_owned());
        }
    }
    None
}

/// The multipart fields of the request, or none without a usable boundary.
pub fn parsed_fields(ctx: &RequestContext) -> Vec<MultipartField> {
    match boundary(ctx) {
        Some(boundary) => parse_multipart(&ctx.body, &boundary),
        None => Vec::new(),
    }
}
