use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::common::{normalize_email, ApiError, ApiResult, JsonBody};
use crate::domains::history::{HistoryInput, VolunteerHistoryEntry};
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

const ENTRY: &str = "Volunteer history entry";

/// `?email=` lets admins address another volunteer's entries
#[derive(Debug, Default, Deserialize)]
pub struct HistoryScope {
    pub email: Option<String>,
}

impl HistoryScope {
    /// Whose entries the request targets; non-admins may only name themselves
    fn owner(&self, user: &AuthUser) -> ApiResult<String> {
        let email = self
            .email
            .as_deref()
            .map(normalize_email)
            .unwrap_or_else(|| user.email.clone());
        user.ensure_can_access(&email)?;
        Ok(email)
    }
}

pub async fn save_history_handler(
    Extension(deps): Extension<ServerDeps>,
    user: AuthUser,
    JsonBody(input): JsonBody<HistoryInput>,
) -> ApiResult<(StatusCode, Json<VolunteerHistoryEntry>)> {
    let email = match &input.email {
        Some(email) if user.is_admin() => normalize_email(email),
        _ => user.email.clone(),
    };
    let entry = input.validate(&email)?;

    let status = if deps.history.upsert_entry(&entry).await? {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(entry)))
}

/// Caller's entries; admins see everyone's
pub async fn list_history_handler(
    Extension(deps): Extension<ServerDeps>,
    user: AuthUser,
) -> ApiResult<Json<Vec<VolunteerHistoryEntry>>> {
    let scope = if user.is_admin() { None } else { Some(user.email.as_str()) };
    Ok(Json(deps.history.list_entries(scope).await?))
}

pub async fn get_history_handler(
    Extension(deps): Extension<ServerDeps>,
    user: AuthUser,
    Path(event_name): Path<String>,
    Query(scope): Query<HistoryScope>,
) -> ApiResult<Json<VolunteerHistoryEntry>> {
    let email = scope.owner(&user)?;
    deps.history
        .find_entry(&email, &event_name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(ENTRY))
}

pub async fn delete_history_handler(
    Extension(deps): Extension<ServerDeps>,
    user: AuthUser,
    Path(event_name): Path<String>,
    Query(scope): Query<HistoryScope>,
) -> ApiResult<Json<Value>> {
    let email = scope.owner(&user)?;
    if !deps.history.delete_entry(&email, &event_name).await? {
        return Err(ApiError::not_found(ENTRY));
    }
    Ok(Json(json!({ "message": "Volunteer history entry deleted successfully" })))
}
