//! `Accept` header check.

use super::errors;
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use store::VuforiaDatabase;

pub(super) fn validate_accept_header(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    match ctx.header("accept") {
        None | Some("application/json") | Some("*/*") => Ok(()),
        Some(other) => {
            tracing::warn!(accept = other, "unacceptable Accept header");
            Err(errors::invalid_accept_header())
        }
    }
}
