//! `image` form part checks for the query endpoint.

use super::{errors, parsed_fields};
use crate::multipart::field;
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use image::ImageFormat;
use store::VuforiaDatabase;

/// Documented maximum file size for a query image. Documented for PNG, but
/// observed to apply to JPEG as well.
const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

const MAX_WIDTH: u32 = 30000;
const MAX_HEIGHT: u32 = 30000;

pub(super) fn validate_image_field_given(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    if field(&parsed_fields(ctx), "image").is_some() {
        return Ok(());
    }
    tracing::warn!("no image field given");
    Err(errors::image_not_given())
}

pub(super) fn validate_image_is_image(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(image_bytes) = image_bytes(ctx) else {
        return Ok(());
    };
    if image::load_from_memory(&image_bytes).is_err() {
        tracing::warn!("the query image is not an image file");
        return Err(errors::bad_image());
    }
    Ok(())
}

pub(super) fn validate_image_format(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(image_bytes) = image_bytes(ctx) else {
        return Ok(());
    };
    match image::guess_format(&image_bytes) {
        Ok(ImageFormat::Png | ImageFormat::Jpeg) => Ok(()),
        _ => {
            tracing::warn!("the query image is not a PNG or JPEG");
            Err(errors::bad_image())
        }
    }
}

pub(super) fn validate_image_dimensions(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(image_bytes) = image_bytes(ctx) else {
        return Ok(());
    };
    let Ok(loaded) = image::load_from_memory(&image_bytes) else {
        return Ok(());
    };
    if loaded.width() <= MAX_WIDTH && loaded.height() <= MAX_HEIGHT {
        return Ok(());
    }
    tracing::warn!(
        width = loaded.width(),
        height = loaded.height(),
        "the query image dimensions are too large"
    );
    Err(errors::bad_image())
}

pub(super) fn validate_image_file_size(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(image_bytes) = image_bytes(ctx) else {
        return Ok(());
    };
    if image_bytes.len() > MAX_IMAGE_BYTES {
        tracing::warn!(bytes = image_bytes.len(), "the query image file is too large");
        return Err(errors::request_entity_too_large());
    }
    Ok(())
}

fn image_bytes(ctx: &RequestContext) -> Option<Vec<u8>> {
    field(&parsed_fields(ctx), "image").map(|field| field.value.clone())
}
