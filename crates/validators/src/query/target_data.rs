//! `include_target_data` form field check.

use super::{errors, parsed_fields};
use crate::multipart::text_field_or;
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use store::VuforiaDatabase;

pub(super) fn validate_include_target_data(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let fields = parsed_fields(ctx);
    let given = text_field_or(&fields, "include_target_data", "top");
    let lowered = given.to_lowercase();
    if matches!(lowered.as_str(), "top" | "all" | "none") {
        return Ok(());
    }
    tracing::warn!(%given, "include_target_data is not an accepted value");
    Err(errors::invalid_include_target_data(&given))
}

#[cfg(test)]
mod tests {
    use super::super::tests::{multipart_body, BOUNDARY};
    use super::*;

    fn ctx_with(value: Option<&[u8]>) -> RequestContext {
        let mut parts: Vec<(&str, &[u8])> = vec![("image", b"x".as_slice())];
        if let Some(value) = value {
            parts.push(("include_target_data", value));
        }
        RequestContext::new(
            "POST",
            "/v1/query",
            [(
                "Content-Type".to_owned(),
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )],
            multipart_body(&parts),
        )
    }

    #[test]
    fn accepted_values_are_case_insensitive() {
        for value in [b"top".as_slice(), b"ALL", b"None"] {
            assert!(validate_include_target_data(&ctx_with(Some(value)), &[]).is_ok());
        }
        assert!(validate_include_target_data(&ctx_with(None), &[]).is_ok());
    }

    #[test]
    fn other_values_are_rejected_with_the_lowercased_value() {
        let err = validate_include_target_data(&ctx_with(Some(b"Middle")), &[]).unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err.body.contains("Invalid value 'middle'"));
    }
}
