use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::common::{ApiError, ApiResult, JsonBody};
use crate::domains::events::{delete_event, save_event, Event, EventInput, SaveOutcome};
use crate::kernel::ServerDeps;
use crate::server::middleware::{AdminUser, AuthUser};

/// Create, or update by name
pub async fn save_event_handler(
    Extension(deps): Extension<ServerDeps>,
    _admin: AdminUser,
    JsonBody(input): JsonBody<EventInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let event = input.validate(Utc::now().naive_utc())?;

    let (status, message) = match save_event(&event, &deps).await? {
        SaveOutcome::Created => (StatusCode::CREATED, "Event created successfully"),
        SaveOutcome::Updated { .. } => (StatusCode::OK, "Event updated successfully"),
    };

    // Stored row keeps the original createdAt on update
    let stored = deps
        .events
        .find_event(&event.event_name)
        .await?
        .unwrap_or(event);
    Ok((status, Json(json!({ "message": message, "event": stored }))))
}

pub async fn list_events_handler(
    Extension(deps): Extension<ServerDeps>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(deps.events.list_events().await?))
}

pub async fn get_event_handler(
    Extension(deps): Extension<ServerDeps>,
    _user: AuthUser,
    Path(event_name): Path<String>,
) -> ApiResult<Json<Event>> {
    deps.events
        .find_event(&event_name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Event"))
}

pub async fn delete_event_handler(
    Extension(deps): Extension<ServerDeps>,
    _admin: AdminUser,
    Path(event_name): Path<String>,
) -> ApiResult<Json<Value>> {
    if !delete_event(&event_name, &deps).await? {
        return Err(ApiError::not_found("Event"));
    }
    Ok(Json(json!({ "message": "Event deleted successfully" })))
}
