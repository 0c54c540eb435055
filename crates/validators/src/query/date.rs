//! `Date` header checks for the query endpoint.
//!
//! The query gateway accepts more date shapes than the management API, and
//! tolerates far more skew.

use super::errors;
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use chrono::{NaiveDateTime, TimeDelta, Utc};
use store::VuforiaDatabase;

/// The accepted date formats we know of. More are probably accepted.
const ACCEPTED_FORMATS: [&str; 8] = [
    "%a, %b %d %H:%M:%S %Y",
    "%a %b %d %H:%M:%S %Y",
    "%a, %d %b %Y %H:%M:%S",
    "%a %d %b %Y %H:%M:%S",
    "%a, %b %d %H:%M:%S %Y GMT",
    "%a %b %d %H:%M:%S %Y GMT",
    "%a, %d %b %Y %H:%M:%S GMT",
    "%a %d %b %Y %H:%M:%S GMT",
];

/// Requests may be at most this far from server time.
const MAX_SKEW_MINUTES: i64 = 65;

fn parse_date(date_header: &str) -> Option<NaiveDateTime> {
    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date_header, format).ok())
}

pub(super) fn validate_date_header_given(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    if ctx.has_header("date") {
        return Ok(());
    }
    tracing::warn!("no Date header given to the query endpoint");
    Err(errors::date_header_not_given())
}

pub(super) fn validate_date_format(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let date_header = ctx.header("date").unwrap_or_default();
    if parse_date(date_header).is_some() {
        return Ok(());
    }
    tracing::warn!(date_header, "the Date header is in the wrong format");
    Err(errors::date_format_not_valid())
}

pub(super) fn validate_date_in_range(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let date_header = ctx.header("date").unwrap_or_default();
    let Some(given) = parse_date(date_header) else {
        return Ok(());
    };
    let difference = Utc::now().naive_utc() - given;
    if difference.abs() < TimeDelta::minutes(MAX_SKEW_MINUTES) {
        return Ok(());
    }
    tracing::warn!(date_header, "the Date header is out of range");
    Err(errors::request_time_too_skewed())
}
