//! `Content-Length` header checks.
//!
//! A missing header counts as matching the body, since the transport fills
//! it in for every real client.

use super::errors;
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use store::VuforiaDatabase;

fn given_content_length(ctx: &RequestContext) -> Result<i128, ErrorResponse> {
    let Some(given) = ctx.header("content-length") else {
        return Ok(ctx.body.len() as i128);
    };
    given.trim().parse::<i128>().map_err(|_| {
        tracing::warn!("the Content-Length header is not an integer");
        errors::content_length_not_int()
    })
}

pub(super) fn validate_content_length_header_is_int(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    given_content_length(ctx).map(|_| ())
}

pub(super) fn validate_content_length_header_not_too_large(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    if given_content_length(ctx)? > ctx.body.len() as i128 {
        tracing::warn!("the Content-Length header is too large");
        return Err(errors::content_length_too_large());
    }
    Ok(())
}

pub(super) fn validate_content_length_header_not_too_small(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    if given_content_length(ctx)? < ctx.body.len() as i128 {
        tracing::warn!("the Content-Length header is too small");
        return Err(errors::authentication_failure());
    }
    Ok(())
}
