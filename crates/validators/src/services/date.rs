//! `Date` header checks for the management API.

use super::errors;
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use chrono::{NaiveDateTime, TimeDelta, Utc};
use store::VuforiaDatabase;

/// The one format the management API accepts.
const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Requests may be at most this far from server time.
const MAX_SKEW_MINUTES: i64 = 5;

pub(super) fn validate_date_header_given(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    if ctx.has_header("date") {
        return Ok(());
    }
    tracing::warn!("no Date header given");
    Err(errors::fail(400))
}

pub(super) fn validate_date_format(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let date_header = ctx.header("date").unwrap_or_default();
    if NaiveDateTime::parse_from_str(date_header, DATE_FORMAT).is_ok() {
        return Ok(());
    }
    tracing::warn!(date_header, "the Date header is in the wrong format");
    Err(errors::fail(400))
}

pub(super) fn validate_date_in_range(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let date_header = ctx.header("date").unwrap_or_default();
    let Ok(given) = NaiveDateTime::parse_from_str(date_header, DATE_FORMAT) else {
        return Ok(());
    };
    let difference = Utc::now().naive_utc() - given;
    if difference.abs() >= TimeDelta::minutes(MAX_SKEW_MINUTES) {
        tracing::warn!(date_header, "the Date header is out of range");
        return Err(errors::request_time_too_skewed());
    }
    Ok(())
}
