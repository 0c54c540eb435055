//! Project-state check for the query endpoint.

use super::auth::resolve_database;
use super::errors;
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
    tracing::warn!("the project is inactive");
    Err(errors::inactive_project())
}
