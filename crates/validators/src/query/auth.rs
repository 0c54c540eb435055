//! `Authorization` header checks for the query endpoint.

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
    tracing::warn!("no Authorization header given to the query endpoint");
    Err(errors::auth_header_missing())
}

pub(super) fn validate_auth_header_number_of_parts(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let header = ctx.header("authorization").unwrap_or_default();
    let parts: Vec<&str> = header.split(' ').collect();
    if parts.len() == 2 && !parts[1].is_empty() {
        return Ok(());
    }
    tracing::warn!("the Authorization header is malformed");
    Err(errors::malformed_auth_header())
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
    tracing::warn!("the Authorization header has no signature");
    Err(errors::malformed_auth_header())
}

pub(super) fn validate_client_key_exists(
    ctx: &RequestContext,
    databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(access_key) = access_key(ctx) else {
        return Err(errors::malformed_auth_header());
    };
    if databases
        .iter()
        .any(|database| database.client_access_key == access_key)
    {
        return Ok(());
    }
    tracing::warn!(access_key, "the client key is unknown");
    Err(errors::authentication_failure())
}

pub(super) fn validate_authorization(
    ctx: &RequestContext,
    databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    if resolve_database(ctx, databases).is_some() {
        return Ok(());
    }
    tracing::warn!("no database matches the query Authorization header");
    Err(errors::authentication_failure())
}

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
    ::auth::get_database_matching_client_keys(
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
            "POST",
            "/v1/query",
            [("Authorization".to_owned(), value.to_owned())],
            Vec::new(),
        )
    }

    #[test]
    fn missing_header_has_its_own_message() {
        let ctx = RequestContext::new("POST", "/v1/query", Vec::new(), Vec::new());
        let err = validate_auth_header_exists(&ctx, &[]).unwrap_err();
        assert_eq!(err.body, "Authorization header missing.");
    }

    #[test]
    fn single_part_header_is_malformed() {
        let err =
            validate_auth_header_number_of_parts(&ctx_with_auth("onlyscheme"), &[]).unwrap_err();
        assert_eq!(err.body, "Malformed authorization header.");
    }

    #[test]
    fn three_part_header_is_malformed() {
        let err =
            validate_auth_header_number_of_parts(&ctx_with_auth("VWS a b:c"), &[]).unwrap_err();
        assert_eq!(err.status, 401);
    }

    #[test]
    fn missing_signature_is_malformed() {
        assert!(validate_auth_header_has_signature(&ctx_with_auth("VWS key:"), &[]).is_err());
        assert!(validate_auth_header_has_signature(&ctx_with_auth("VWS key:sig"), &[]).is_ok());
    }

    #[test]
    fn unknown_client_key_is_an_authentication_failure() {
        let databases = vec![VuforiaDatabase::new()];
        let err =
            validate_client_key_exists(&ctx_with_auth("VWS nope:sig"), &databases).unwrap_err();
        assert_eq!(err.status, 401);
        assert!(err.body.contains("AuthenticationFailure"));
    }
}
