//! `Content-Type` and multipart boundary checks.

use super::{boundary, errors};
use crate::multipart::find_subslice;
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use store::VuforiaDatabase;

pub(super) fn validate_content_type_header(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let content_type = ctx.header("content-type").unwrap_or_default();
    if content_type.is_empty() {
        tracing::warn!("the Content-Type header is empty or missing");
        return Err(errors::no_content_type());
    }

    let main_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if main_type != "multipart/form-data" && main_type != "*/*" {
        tracing::warn!(main_type, "the Content-Type is not multipart/form-data");
        return Err(errors::unsupported_media_type());
    }

    let Some(boundary) = boundary(ctx) else {
        tracing::warn!("the Content-Type header does not contain a boundary");
        return Err(errors::no_boundary_found());
    };

    if find_subslice(&ctx.body, boundary.as_bytes()).is_none() {
        tracing::warn!("the boundary is not in the request body");
        return Err(errors::image_not_given());
    }
    Ok(())
}
