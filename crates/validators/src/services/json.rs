//! Body syntax and key-set checks.

use super::{body_object, errors};
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use std::collections::BTreeSet;
use store::VuforiaDatabase;

pub(super) fn validate_json(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    if ctx.body.is_empty() {
        return Ok(());
    }
    if ctx.method != "POST" && ctx.method != "PUT" {
        tracing::warn!(method = %ctx.method, "request body given to a bodyless endpoint");
        return Err(errors::unnecessary_request_body());
    }
    if serde_json::from_slice::<serde_json::Value>(&ctx.body).is_err() {
        tracing::warn!("the request body is not valid JSON");
        return Err(errors::fail(400));
    }
    Ok(())
}

pub(super) fn validate_keys(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let (mandatory, optional) = route_key_sets(ctx);
    let allowed: BTreeSet<&str> = mandatory.iter().chain(optional.iter()).copied().collect();

    if ctx.body.is_empty() && allowed.is_empty() {
        return Ok(());
    }
    let Some(object) = body_object(ctx) else {
        // Either no body where keys are mandatory, or a non-object body.
        tracing::warn!("invalid keys given to endpoint");
        return Err(errors::fail(400));
    };
    let given: BTreeSet<&str> = object.keys().map(String::as_str).collect();
    let all_given_allowed = given.iter().all(|key| allowed.contains(key));
    let all_mandatory_given = mandatory.iter().all(|key| given.contains(key));
    if all_given_allowed && all_mandatory_given {
        return Ok(());
    }
    tracing::warn!("invalid keys given to endpoint");
    Err(errors::fail(400))
}

/// Mandatory and optional body keys per route, the full route table of the
/// management API.
fn route_key_sets(ctx: &RequestContext) -> (&'static [&'static str], &'static [&'static str]) {
    const NONE: &[&str] = &[];
    const ADD_MANDATORY: &[&str] = &["image", "width", "name"];
    const ADD_OPTIONAL: &[&str] = &["active_flag", "application_metadata"];
    const UPDATE_OPTIONAL: &[&str] = &[
        "active_flag",
        "application_metadata",
        "image",
        "name",
        "width",
    ];

    let segments = ctx.path_segments();
    match (segments.as_slice(), ctx.method.as_str()) {
        (["targets"], "POST") => (ADD_MANDATORY, ADD_OPTIONAL),
        (["targets", _], "PUT") => (NONE, UPDATE_OPTIONAL),
        _ => (NONE, NONE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(method: &str, path: &str, body: &[u8]) -> RequestContext {
        RequestContext::new(method, path, Vec::new(), body.to_vec())
    }

    #[test]
    fn body_on_a_get_endpoint_is_unnecessary() {
        let err = validate_json(&ctx("GET", "/targets", b"{}"), &[]).unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err.body.is_empty());
    }

    #[test]
    fn invalid_json_fails() {
        let err = validate_json(&ctx("POST", "/targets", b"not json"), &[]).unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err.body.contains("\"Fail\""));
    }

    #[test]
    fn unknown_keys_fail() {
        let body = br#"{"name":"x","width":1,"image":"","bogus":true}"#;
        let err = validate_keys(&ctx("POST", "/targets", body), &[]).unwrap_err();
        assert_eq!(err.status, 400);
    }

    #[test]
    fn missing_mandatory_keys_fail() {
        let body = br#"{"name":"x"}"#;
        let err = validate_keys(&ctx("POST", "/targets", body), &[]).unwrap_err();
        assert_eq!(err.status, 400);
    }

    #[test]
    fn update_accepts_any_subset_of_its_optional_keys() {
        let body = br#"{"width":2.0}"#;
        assert!(validate_keys(&ctx("PUT", "/targets/abc123", body), &[]).is_ok());
        assert!(validate_keys(&ctx("PUT", "/targets/abc123", br#"{}"#), &[]).is_ok());
    }

    #[test]
    fn bodyless_routes_accept_empty_bodies() {
        assert!(validate_keys(&ctx("GET", "/summary", b""), &[]).is_ok());
        assert!(validate_keys(&ctx("DELETE", "/targets/abc123", b""), &[]).is_ok());
    }
}
