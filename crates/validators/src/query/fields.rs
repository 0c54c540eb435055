//! Unknown form field rejection.

use super::{errors, parsed_fields};
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use store::VuforiaDatabase;

const KNOWN_PARAMETERS: [&str; 3] = ["image", "max_num_results", "include_target_data"];

pub(super) fn validate_extra_fields(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let unknown: Vec<String> = parsed_fields(ctx)
        .into_iter()
        .map(|field| field.name)
        .filter(|name| !KNOWN_PARAMETERS.contains(&name.as_str()))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    tracing::warn!(?unknown, "unknown parameters in the request");
    Err(errors::unknown_parameters())
}
