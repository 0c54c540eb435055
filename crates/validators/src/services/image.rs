//! `image` field checks for the management API.

use super::{body_object, errors};
use crate::b64::decode_base64;
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use image::ImageFormat;
use store::VuforiaDatabase;

/// The largest image the management API accepts, in decoded bytes.
const MAX_IMAGE_BYTES: usize = 2_359_293;

pub(super) fn validate_image_data_type(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(object) = body_object(ctx) else {
        return Ok(());
    };
    match object.get("image") {
        None | Some(serde_json::Value::String(_)) => Ok(()),
        Some(_) => {
            tracing::warn!("image data is not a string");
            Err(errors::fail(400))
        }
    }
}

pub(super) fn validate_image_encoding(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(encoded) = image_string(ctx) else {
        return Ok(());
    };
    if decode_base64(&encoded).is_err() {
        tracing::warn!("image data cannot be base64 decoded");
        return Err(errors::fail(422));
    }
    Ok(())
}

pub(super) fn validate_image_is_image(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(decoded) = decoded_image(ctx) else {
        return Ok(());
    };
    if image::load_from_memory(&decoded).is_err() {
        tracing::warn!("image data is not an image file");
        return Err(errors::bad_image());
    }
    Ok(())
}

pub(super) fn validate_image_format(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(decoded) = decoded_image(ctx) else {
        return Ok(());
    };
    match image::guess_format(&decoded) {
        Ok(ImageFormat::Png | ImageFormat::Jpeg) => Ok(()),
        _ => {
            tracing::warn!("the image is not a PNG or JPEG");
            Err(errors::bad_image())
        }
    }
}

pub(super) fn validate_image_color_space(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(decoded) = decoded_image(ctx) else {
        return Ok(());
    };
    let Ok(loaded) = image::load_from_memory(&decoded) else {
        return Ok(());
    };
    match loaded.color() {
        image::ColorType::L8 | image::ColorType::Rgb8 => Ok(()),
        _ => {
            tracing::warn!("the image is not in the RGB or greyscale color space");
            Err(errors::bad_image())
        }
    }
}

pub(super) fn validate_image_size(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(decoded) = decoded_image(ctx) else {
        return Ok(());
    };
    if decoded.len() > MAX_IMAGE_BYTES {
        tracing::warn!(bytes = decoded.len(), "the image is too large");
        return Err(errors::image_too_large());
    }
    Ok(())
}

fn image_string(ctx: &RequestContext) -> Option<String> {
    let object = body_object(ctx)?;
    match object.get("image") {
        Some(serde_json::Value::String(value)) => Some(value.clone()),
        _ => None,
    }
}

fn decoded_image(ctx: &RequestContext) -> Option<Vec<u8>> {
    decode_base64(&image_string(ctx)?).ok()
}
