//! Project-state and target-existence checks.

use super::{errors, resolve_database};
use crate::request::RequestContext;
use crate::respond::ErrorResponse;
use store::{DatabaseState, VuforiaDatabase};

pub(super) fn validate_project_state(
    ctx: &RequestContext,
    databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(database) = resolve_database(ctx, databases) else {
        return Ok(());
    };
    if database.state != DatabaseState::ProjectInactive {
        return Ok(());
    }
    // Plain reads still work against an inactive project; the duplicates
    // endpoint does not.
    if ctx.method == "GET" && !ctx.path.contains("duplicates") {
        return Ok(());
    }
    tracing::warn!("the project is inactive");
    Err(errors::project_inactive())
}

pub(super) fn validate_target_id_exists(
    ctx: &RequestContext,
    databases: &[VuforiaDatabase],
) -> Result<(), ErrorResponse> {
    let Some(target_id) = ctx.target_id() else {
        return Ok(());
    };
    let Some(database) = resolve_database(ctx, databases) else {
        return Ok(());
    };
    if database
        .not_deleted_targets()
        .any(|target| target.target_id == target_id)
    {
        return Ok(());
    }
    tracing::warn!(target_id, "the target id does not exist");
    Err(errors::unknown_target())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::respond::rfc1123_date;
    use ::auth::authorization_header;
    use chrono::Utc;
    use matchers::HardcodedRater;
    use store::Target;

    fn signed_get(database: &VuforiaDatabase, path: &str) -> RequestContext {
        let date = rfc1123_date();
        let authorization = authorization_header(
            &database.server_access_key,
            &database.server_secret_key,
            "GET",
            b"",
            "",
            &date,
            path,
        );
        RequestContext::new(
            "GET",
            path,
            [
                ("Authorization".to_owned(), authorization),
                ("Date".to_owned(), date),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn unknown_target_id_is_a_404() {
        let database = VuforiaDatabase::new();
        let ctx = signed_get(&database, "/targets/0123456789ab");
        let databases = vec![database];
        let err = validate_target_id_exists(&ctx, &databases).unwrap_err();
        assert_eq!(err.status, 404);
        assert!(err.body.contains("UnknownTarget"));
    }

    #[test]
    fn tombstoned_target_id_is_unknown() {
        let mut database = VuforiaDatabase::new();
        let now = Utc::now();
        let mut target = Target::new(
            "gone".to_owned(),
            1.0,
            vec![1],
            true,
            None,
            0.5,
            &HardcodedRater::new(1),
            now,
        );
        target.delete_date = Some(now);
        let path = format!("/targets/{}", target.target_id);
        database.targets.insert(target.target_id.clone(), target);
        let ctx = signed_get(&database, &path);
        let databases = vec![database];
        assert!(validate_target_id_exists(&ctx, &databases).is_err());
    }

    #[test]
    fn listing_paths_have_no_target_id() {
        let database = VuforiaDatabase::new();
        let ctx = signed_get(&database, "/targets");
        let databases = vec![database];
        assert!(validate_target_id_exists(&ctx, &databases).is_ok());
    }
}
