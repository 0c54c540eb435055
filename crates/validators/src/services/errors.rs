//! The management API's error catalogue.
//!
//! Every rejection the management pipeline can produce, reproduced shape
//! for shape: most are JSON behind an envoy-fronted header set, but the
//! transport-level failures mimic the load balancer's own pages.

use crate::respond::{rfc1123_date, transaction_body, ErrorResponse};
use crate::result_codes::ResultCode;

/// The load balancer's own 400 page, emitted before the service sees the
/// request at all.
const BAD_REQUEST_HTML: &str = "<html>\r\n\
<head><title>400 Bad Request</title></head>\r\n\
<body>\r\n\
<center><h1>400 Bad Request</h1></center>\r\n\
</body>\r\n\
</html>\r\n";

/// The application server's error page for a request it cannot represent.
const OOPS_HTML: &str = "<html>\n\
    <head>\n\
        <title>Oops, an error occurred</title>\n\
    </head>\n\
    <body>\n\
        <h1>Oops, an error occurred</h1>\n\
        <p>This exception has been logged with id <strong>6fcb27e34ac8dcd8</strong>.</p>\n\
    </body>\n\
</html>\n";

fn envoy_headers(body: &str, content_type: Option<&'static str>) -> Vec<(&'static str, String)> {
    let mut headers = vec![("Connection", "keep-alive".to_owned())];
    if let Some(content_type) = content_type {
        headers.push(("Content-Type", content_type.to_owned()));
    }
    headers.extend([
        ("server", "envoy".to_owned()),
        ("Date", rfc1123_date()),
        ("x-envoy-upstream-service-time", "5".to_owned()),
        ("Content-Length", body.len().to_string()),
        ("strict-transport-security", "max-age=31536000".to_owned()),
        ("x-aws-region", "us-east-2, us-west-2".to_owned()),
        ("x-content-type-options", "nosniff".to_owned()),
    ]);
    headers
}

fn envoy_json(status: u16, result_code: ResultCode) -> ErrorResponse {
    let body = transaction_body(result_code);
    ErrorResponse {
        status,
        headers: envoy_headers(&body, Some("application/json")),
        body,
    }
}

pub fn unknown_target() -> ErrorResponse {
    envoy_json(404, ResultCode::UnknownTarget)
}

pub fn project_inactive() -> ErrorResponse {
    envoy_json(403, ResultCode::ProjectInactive)
}

pub fn authentication_failure() -> ErrorResponse {
    let mut response = envoy_json(401, ResultCode::AuthenticationFailure);
    response
        .headers
        .push(("WWW-Authenticate", "VWS".to_owned()));
    response
}

pub fn fail(status: u16) -> ErrorResponse {
    envoy_json(status, ResultCode::Fail)
}

pub fn metadata_too_large() -> ErrorResponse {
    envoy_json(422, ResultCode::MetadataTooLarge)
}

pub fn target_name_exist() -> ErrorResponse {
    envoy_json(403, ResultCode::TargetNameExist)
}

pub fn bad_image() -> ErrorResponse {
    envoy_json(422, ResultCode::BadImage)
}

pub fn image_too_large() -> ErrorResponse {
    envoy_json(422, ResultCode::ImageTooLarge)
}

pub fn request_time_too_skewed() -> ErrorResponse {
    envoy_json(403, ResultCode::RequestTimeTooSkewed)
}

pub fn target_status_processing() -> ErrorResponse {
    envoy_json(403, ResultCode::TargetStatusProcessing)
}

pub fn target_status_not_success() -> ErrorResponse {
    envoy_json(403, ResultCode::TargetStatusNotSuccess)
}

/// `Content-Length` is not an integer: the load balancer's own 400 page.
pub fn content_length_not_int() -> ErrorResponse {
    ErrorResponse {
        status: 400,
        headers: vec![
            ("Connection", "Close".to_owned()),
            ("Content-Length", BAD_REQUEST_HTML.len().to_string()),
            ("Date", rfc1123_date()),
            ("Server", "awselb/2.0".to_owned()),
            ("Content-Type", "text/html".to_owned()),
        ],
        body: BAD_REQUEST_HTML.to_owned(),
    }
}

/// `Content-Length` larger than the body: the gateway gives up waiting for
/// bytes that never arrive.
pub fn content_length_too_large() -> ErrorResponse {
    let body = "stream timeout".to_owned();
    ErrorResponse {
        status: 408,
        headers: vec![
            ("Content-Length", body.len().to_string()),
            ("Date", rfc1123_date()),
            ("server", "envoy".to_owned()),
            ("Content-Type", "text/plain".to_owned()),
            ("Connection", "close".to_owned()),
        ],
        body,
    }
}

/// A body was sent to an endpoint which takes none: empty 400, and notably
/// no `Content-Type` header at all.
pub fn unnecessary_request_body() -> ErrorResponse {
    ErrorResponse {
        status: 400,
        headers: vec![
            ("server", "envoy".to_owned()),
            ("Date", rfc1123_date()),
            ("x-envoy-upstream-service-time", "5".to_owned()),
            ("Content-Length", "0".to_owned()),
        ],
        body: String::new(),
    }
}

/// A target name outside the basic multilingual plane crashes the real
/// service's add-target path into its generic error page.
pub fn oops_error_occurred() -> ErrorResponse {
    ErrorResponse {
        status: 500,
        headers: vec![
            ("Connection", "keep-alive".to_owned()),
            ("Content-Type", "text/html; charset=UTF-8".to_owned()),
            ("server", "envoy".to_owned()),
            ("Date", rfc1123_date()),
            ("Content-Length", OOPS_HTML.len().to_string()),
        ],
        body: OOPS_HTML.to_owned(),
    }
}
