//! `Authorization` header checks for the management API.

use super::errors;
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use store::VuforiaDatabase;

pub(super) fn validate_auth_header_exists(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    if ctx.has_header("authorization") {
        return Ok(());
    }
    tracing::warn!("no Authorization header given");
    Err(errors::authentication_failure())
}

pub(super) fn validate_auth_header_has_signature(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let header = ctx.header("authorization").unwrap_or_default();
    if header.matches(':').count() == 1 && !header.split(':').nth(1).unwrap_or_default().is_empty()
    {
        return Ok(());
    }
    tracing::warn!("the Authorization header does not include a signature");
    Err(errors::fail(400))
}

pub(super) fn validate_access_key_exists(
    ctx: &RequestContext,
    databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(access_key) = access_key(ctx) else {
        return Err(errors::fail(400));
    };
    if databases
        .iter()
        .any(|database| database.server_access_key == access_key)
    {
        return Ok(());
    }
    tracing::warn!(access_key, "the access key does not match any database");
    Err(errors::fail(400))
}

pub(super) fn validate_authorization(
    ctx: &RequestContext,
    databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    if resolve_database(ctx, databases).is_some() {
        return Ok(());
    }
    tracing::warn!("no database matches the given Authorization header");
    Err(errors::authentication_failure())
}

/// The access key portion of `"<scheme> <access>:<signature>"`.
fn access_key(ctx: &RequestContext) -> Option<String> {
    let header = ctx.header("authorization")?;
    let (first_part, _signature) = header.split_once(':')?;
    let (_scheme, access_key) = first_part.split_once(' ')?;
    Some(access_key.to_owned())
}

pub(crate) fn resolve_database<'a>(
    ctx: &RequestContext,
    databases: &'a [VuforiaDatabase],
) -> Option<&'a VuforiaDatabase> {
    ::auth::get_database_matching_server_keys(
        databases,
        ctx.header("authorization"),
        &ctx.method,
        &ctx.body,
        ctx.header("content-type").unwrap_or_default(),
        ctx.header("date").unwrap_or_default(),
        &ctx.path,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with_auth(value: &str) -> RequestContext {
        RequestContext::new(
            "GET",
            "/targets",
            [("Authorization".to_owned(), value.to_owned())],
            Vec::new(),
        )
    }

    #[test]
    fn header_without_colon_has_no_signature() {
        let err =
            validate_auth_header_has_signature(&ctx_with_auth("VWS key"), &[]).unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err.body.contains("\"Fail\""));
    }

    #[test]
    fn header_with_empty_signature_is_rejected() {
        let err =
            validate_auth_header_has_signature(&ctx_with_auth("VWS key:"), &[]).unwrap_err();
        assert_eq!(err.status, 400);
    }

    #[test]
    fn well_shaped_header_passes_the_shape_check() {
        assert!(validate_auth_header_has_signature(&ctx_with_auth("VWS key:sig"), &[]).is_ok());
    }

    #[test]
    fn unknown_access_key_fails() {
        let databases = vec![VuforiaDatabase::new()];
        let err =
            validate_access_key_exists(&ctx_with_auth("VWS unknown:sig"), &databases).unwrap_err();
        assert_eq!(err.status, 400);
    }

    #[test]
    fn known_access_key_with_bad_signature_reaches_the_signature_step() {
        let database = VuforiaDatabase::new();
        let header = format!("VWS {}:badsignature", database.server_access_key);
        let databases = vec![database];
        assert!(validate_access_key_exists(&ctx_with_auth(&header), &databases).is_ok());
        let err = validate_authorization(&ctx_with_auth(&header), &databases).unwrap_err();
        assert_eq!(err.status, 401);
        assert!(err.body.contains("AuthenticationFailure"));
    }
}
