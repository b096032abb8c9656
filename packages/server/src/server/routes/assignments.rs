use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::common::{normalize_email, ApiError, ApiResult, JsonBody};
use crate::domains::assignments::{assign_volunteer, AssignOutcome, Assignment, AssignmentInput};
use crate::kernel::ServerDeps;
use crate::server::middleware::{AdminUser, AuthUser};

/// Volunteers register themselves; admins may assign anyone
pub async fn assign_handler(
    Extension(deps): Extension<ServerDeps>,
    user: AuthUser,
    JsonBody(input): JsonBody<AssignmentInput>,
) -> ApiResult<(StatusCode, Json<Assignment>)> {
    let assignment = input.validate()?;
    user.ensure_can_access(&assignment.email)?;

    match assign_volunteer(&assignment, &deps).await? {
        AssignOutcome::Assigned => Ok((StatusCode::CREATED, Json(assignment))),
        AssignOutcome::EventNotFound => Err(ApiError::not_found("Event")),
        AssignOutcome::AlreadyAssigned => Err(ApiError::Conflict(
            "Volunteer is already registered for this event".to_string(),
        )),
    }
}

pub async fn list_for_event_handler(
    Extension(deps): Extension<ServerDeps>,
    _admin: AdminUser,
    Path(event_name): Path<String>,
) -> ApiResult<Json<Vec<Assignment>>> {
    Ok(Json(deps.assignments.list_assignments_for_event(&event_name).await?))
}

pub async fn list_for_user_handler(
    Extension(deps): Extension<ServerDeps>,
    user: AuthUser,
    Path(email): Path<String>,
) -> ApiResult<Json<Vec<Assignment>>> {
    let email = normalize_email(&email);
    user.ensure_can_access(&email)?;
    Ok(Json(deps.assignments.list_assignments_for_user(&email).await?))
}

pub async fn unassign_handler(
    Extension(deps): Extension<ServerDeps>,
    user: AuthUser,
    Path((event_name, email)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let email = normalize_email(&email);
    user.ensure_can_access(&email)?;

    if !deps.assignments.delete_assignment(&event_name, &email).await? {
        return Err(ApiError::not_found("Assignment"));
    }
    tracing::info!(event = %event_name, email = %email, "Volunteer unassigned");
    Ok(Json(json!({ "message": "Volunteer removed from event" })))
}
