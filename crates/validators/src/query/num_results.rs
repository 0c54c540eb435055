//! `max_num_results` form field check.

use super::{errors, parsed_fields};
use crate::multipart::text_field_or;
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use store::VuforiaDatabase;

/// Values above this parse, but the service's Java stack cannot represent
/// them and reports them as non-integers.
const JAVA_MAX_INT: i64 = 2_147_483_647;

const MAX_ALLOWED_RESULTS: i64 = 50;

pub(super) fn validate_max_num_results(
    ctx: &RequestContext,
    _databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let fields = parsed_fields(ctx);
    let given = text_field_or(&fields, "max_num_results", "1");

    let Ok(value) = given.parse::<i64>() else {
        tracing::warn!(%given, "max_num_results is not an integer");
        return Err(errors::invalid_max_num_results(&given));
    };
    if value > JAVA_MAX_INT {
        tracing::warn!(%given, "max_num_results exceeds the service's integer range");
        return Err(errors::invalid_max_num_results(&given));
    }
    if !(1..=MAX_ALLOWED_RESULTS).contains(&value) {
        tracing::warn!(value, "max_num_results is out of range");
        return Err(errors::max_num_results_out_of_range(&value.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::tests::{multipart_body, BOUNDARY};
    use super::*;

    fn ctx_with(value: Option<&[u8]>) -> RequestContext {
        let mut parts: Vec<(&str, &[u8])> = vec![("image", b"x".as_slice())];
        if let Some(value) = value {
            parts.push(("max_num_results", value));
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
    fn absent_field_defaults_to_one() {
        assert!(validate_max_num_results(&ctx_with(None), &[]).is_ok());
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(validate_max_num_results(&ctx_with(Some(b"1")), &[]).is_ok());
        assert!(validate_max_num_results(&ctx_with(Some(b"50")), &[]).is_ok());
    }

    #[test]
    fn non_integers_get_the_invalid_value_message() {
        let err = validate_max_num_results(&ctx_with(Some(b"1.5")), &[]).unwrap_err();
        assert!(err.body.starts_with("Invalid value '1.5'"));
    }

    #[test]
    fn out_of_range_values_get_the_range_message() {
        let err = validate_max_num_results(&ctx_with(Some(b"51")), &[]).unwrap_err();
        assert_eq!(
            err.body,
            "Integer out of range (51) in form data part 'max_result'. \
             Accepted range is from 1 to 50 (inclusive)."
        );
        let err = validate_max_num_results(&ctx_with(Some(b"0")), &[]).unwrap_err();
        assert!(err.body.starts_with("Integer out of range (0)"));
    }

    #[test]
    fn values_beyond_java_int_range_are_invalid_not_out_of_range() {
        let err = validate_max_num_results(&ctx_with(Some(b"2147483648")), &[]).unwrap_err();
        assert!(err.body.starts_with("Invalid value '2147483648'"));
    }
}
