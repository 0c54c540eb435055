//! Response building blocks shared by both error catalogues.

use crate::result_codes::ResultCode;
use chrono::Utc;
use uuid::Uuid;

/// A fully formed protocol error: the pipeline's short-circuit value.
///
/// Header names are `'static` because every shape is catalogued; values are
/// computed (dates, content lengths).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

/// The current time formatted as an RFC 1123 GMT date header value.
pub fn rfc1123_date() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

pub(crate) fn transaction_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// The service's normal JSON dump: compact separators, no spaces.
pub(crate) fn transaction_body(result_code: ResultCode) -> String {
    format!(
        "{{\"transaction_id\":\"{}\",\"result_code\":\"{}\"}}",
        transaction_id(),
        result_code.as_str(),
    )
}

/// The hand-built variant some error paths use: a single space after the
/// first colon only. This asymmetry is part of the emulated contract.
pub(crate) fn spaced_transaction_body(result_code: ResultCode) -> String {
    format!(
        "{{\"transaction_id\": \"{}\",\"result_code\":\"{}\"}}",
        transaction_id(),
        result_code.as_str(),
    )
}
