//! The query API's error catalogue.
//!
//! The query endpoint fronts a different stack than the management API, and
//! its failures show it: nginx headers, plain-text bodies, hand-built JSON
//! with inconsistent separators, and canned pages from Jetty, RESTEasy, and
//! nginx itself. Every shape here is part of the emulated contract.

use crate::respond::{
    rfc1123_date, spaced_transaction_body, transaction_body, ErrorResponse,
};
use crate::result_codes::ResultCode;

/// The nginx 413 page for oversized query images.
const REQUEST_ENTITY_TOO_LARGE_HTML: &str = "<html>\r\n\
<head><title>413 Request Entity Too Large</title></head>\r\n\
<body>\r\n\
<center><h1>413 Request Entity Too Large</h1></center>\r\n\
<hr><center>nginx</center>\r\n\
</body>\r\n\
</html>\r\n";

/// The Jetty error page returned when no content type is given.
const JETTY_NO_CONTENT_TYPE_HTML: &str = "<html>\n\
<head>\n\
<meta http-equiv=\"Content-Type\" content=\"text/html;charset=ISO-8859-1\"/>\n\
<title>Error 400 Bad Request</title>\n\
</head>\n\
<body>\n\
<h2>HTTP ERROR 400 Bad Request</h2>\n\
<table>\n\
<tr><th>URI:</th><td>http://cloudreco.vuforia.com/v1/query</td></tr>\n\
<tr><th>STATUS:</th><td>400</td></tr>\n\
<tr><th>MESSAGE:</th><td>Bad Request</td></tr>\n\
</table>\n\
<hr/><a href=\"https://jetty.org/\">Powered by Jetty:// 12.0.20</a><hr/>\n\
\n\
</body>\n\
</html>\n";

/// The Jetty 500 page returned while a matching target is in flux. Each
/// response from the real service differs; the emulator always returns this
/// one so the transient state is loudly and reproducibly visible.
const MATCH_PROCESSING_HTML: &str = "<!DOCTYPE html>\n\
<html>\n\
<head>\n\
<meta http-equiv=\"Content-Type\" content=\"text/html;charset=ISO-8859-1\"/>\n\
<title>Error 500 Server Error</title>\n\
</head>\n\
<body><h2>HTTP ERROR 500</h2>\n\
<p>Problem accessing /v1/query. Reason:\n\
<pre>    Server Error</pre></p>\n\
<hr/><a href=\"https://jetty.org/\">Powered by Jetty:// 12.0.20</a><hr/>\n\
\n\
</body>\n\
</html>\n";

fn nginx_headers(body: &str, content_type: Option<&'static str>) -> Vec<(&'static str, String)> {
    let mut headers = Vec::new();
    if let Some(content_type) = content_type {
        headers.push(("Content-Type", content_type.to_owned()));
    }
    headers.extend([
        ("Connection", "keep-alive".to_owned()),
        ("Server", "nginx".to_owned()),
        ("Date", rfc1123_date()),
        ("Content-Length", body.len().to_string()),
    ]);
    headers
}

fn plain_text(status: u16, body: &str, www_authenticate: bool) -> ErrorResponse {
    let mut headers = nginx_headers(body, Some("text/plain;charset=iso-8859-1"));
    if www_authenticate {
        headers.push(("WWW-Authenticate", "VWS".to_owned()));
    }
    ErrorResponse {
        status,
        headers,
        body: body.to_owned(),
    }
}

pub fn date_header_not_given() -> ErrorResponse {
    plain_text(400, "Date header required.", false)
}

pub fn date_format_not_valid() -> ErrorResponse {
    plain_text(401, "Malformed date header.", true)
}

pub fn auth_header_missing() -> ErrorResponse {
    plain_text(401, "Authorization header missing.", true)
}

pub fn malformed_auth_header() -> ErrorResponse {
    plain_text(401, "Malformed authorization header.", true)
}

pub fn request_time_too_skewed() -> ErrorResponse {
    let body = transaction_body(ResultCode::RequestTimeTooSkewed);
    ErrorResponse {
        status: 403,
        headers: nginx_headers(&body, Some("application/json")),
        body,
    }
}

/// The query auth failure is hand-built JSON; it happens to match the
/// compact dump byte for byte.
pub fn authentication_failure() -> ErrorResponse {
    let body = transaction_body(ResultCode::AuthenticationFailure);
    let mut headers = nginx_headers(&body, Some("application/json"));
    headers.push(("WWW-Authenticate", "VWS".to_owned()));
    ErrorResponse {
        status: 401,
        headers,
        body,
    }
}

pub fn bad_image() -> ErrorResponse {
    let body = spaced_transaction_body(ResultCode::BadImage);
    ErrorResponse {
        status: 422,
        headers: nginx_headers(&body, Some("application/json")),
        body,
    }
}

pub fn inactive_project() -> ErrorResponse {
    let body = spaced_transaction_body(ResultCode::InactiveProject);
    ErrorResponse {
        status: 403,
        headers: nginx_headers(&body, Some("application/json")),
        body,
    }
}

pub fn image_not_given() -> ErrorResponse {
    let body = "No image.";
    ErrorResponse {
        status: 400,
        headers: nginx_headers(body, Some("application/json")),
        body: body.to_owned(),
    }
}

pub fn unknown_parameters() -> ErrorResponse {
    let body = "Unknown parameters in the request.";
    ErrorResponse {
        status: 400,
        headers: nginx_headers(body, Some("application/json")),
        body: body.to_owned(),
    }
}

pub fn invalid_max_num_results(given_value: &str) -> ErrorResponse {
    let body = format!(
        "Invalid value '{given_value}' in form data part 'max_result'. \
         Expecting integer value in range from 1 to 50 (inclusive)."
    );
    ErrorResponse {
        status: 400,
        headers: nginx_headers(&body, Some("application/json")),
        body,
    }
}

pub fn max_num_results_out_of_range(given_value: &str) -> ErrorResponse {
    let body = format!(
        "Integer out of range ({given_value}) in form data part 'max_result'. \
         Accepted range is from 1 to 50 (inclusive)."
    );
    ErrorResponse {
        status: 400,
        headers: nginx_headers(&body, Some("application/json")),
        body,
    }
}

pub fn invalid_include_target_data(given_value: &str) -> ErrorResponse {
    let body = format!(
        "Invalid value '{}' in form data part 'include_target_data'. \
         Expecting one of the (unquoted) string values 'all', 'none' or 'top'.",
        given_value.to_lowercase()
    );
    ErrorResponse {
        status: 400,
        headers: nginx_headers(&body, Some("application/json")),
        body,
    }
}

pub fn unsupported_media_type() -> ErrorResponse {
    ErrorResponse {
        status: 415,
        headers: nginx_headers("", None),
        body: String::new(),
    }
}

pub fn invalid_accept_header() -> ErrorResponse {
    ErrorResponse {
        status: 406,
        headers: nginx_headers("", None),
        body: String::new(),
    }
}

pub fn no_boundary_found() -> ErrorResponse {
    let body = "RESTEASY007550: Unable to get boundary for multipart";
    ErrorResponse {
        status: 500,
        headers: nginx_headers(body, Some("application/json")),
        body: body.to_owned(),
    }
}

pub fn no_content_type() -> ErrorResponse {
    let body = JETTY_NO_CONTENT_TYPE_HTML;
    ErrorResponse {
        status: 400,
        headers: vec![
            ("Connection", "keep-alive".to_owned()),
            ("Content-Type", "text/html;charset=iso-8859-1".to_owned()),
            ("Server", "nginx".to_owned()),
            ("Cache-Control", "must-revalidate,no-cache,no-store".to_owned()),
            ("Date", rfc1123_date()),
            ("Content-Length", body.len().to_string()),
        ],
        body: body.to_owned(),
    }
}

pub fn content_length_not_int() -> ErrorResponse {
    ErrorResponse {
        status: 400,
        headers: vec![
            ("Connection", "Close".to_owned()),
            ("Content-Length", "0".to_owned()),
        ],
        body: String::new(),
    }
}

/// The bare 504 the gateway produces when it gives up on a request.
pub fn gateway_timeout() -> ErrorResponse {
    ErrorResponse {
        status: 504,
        headers: vec![
            ("Connection", "keep-alive".to_owned()),
            ("Content-Length", "0".to_owned()),
        ],
        body: String::new(),
    }
}

pub fn content_length_too_large() -> ErrorResponse {
    gateway_timeout()
}

pub fn request_entity_too_large() -> ErrorResponse {
    let body = REQUEST_ENTITY_TOO_LARGE_HTML;
    ErrorResponse {
        status: 413,
        headers: vec![
            ("Connection", "Close".to_owned()),
            ("Date", rfc1123_date()),
            ("Server", "nginx".to_owned()),
            ("Content-Type", "text/html".to_owned()),
            ("Content-Length", body.len().to_string()),
        ],
        body: body.to_owned(),
    }
}

/// The transient 500 returned when a matching target is processing or was
/// recently deleted.
pub fn match_processing() -> ErrorResponse {
    let body = MATCH_PROCESSING_HTML;
    ErrorResponse {
        status: 500,
        headers: vec![
            ("Connection", "keep-alive".to_owned()),
            ("Server", "nginx".to_owned()),
            ("Date", rfc1123_date()),
            ("Cache-Control", "must-revalidate,no-cache,no-store".to_owned()),
            ("Content-Type", "text/html; charset=ISO-8859-1".to_owned()),
            ("Content-Length", body.len().to_string()),
        ],
        body: body.to_owned(),
    }
}
