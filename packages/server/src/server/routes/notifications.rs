use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{ApiError, ApiResult, JsonBody};
use crate::domains::notifications::{Notification, NotificationInput};
use crate::kernel::ServerDeps;
use crate::server::middleware::{AdminUser, AuthUser};

/// Caller's notifications plus broadcasts, newest first
pub async fn list_notifications_handler(
    Extension(deps): Extension<ServerDeps>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Notification>>> {
    Ok(Json(deps.notifications.list_notifications_for(&user.email).await?))
}

pub async fn create_notification_handler(
    Extension(deps): Extension<ServerDeps>,
    _admin: AdminUser,
    JsonBody(input): JsonBody<NotificationInput>,
) -> ApiResult<(StatusCode, Json<Notification>)> {
    let notification = input.validate()?;
    deps.notifications.insert_notification(&notification).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

pub async fn delete_notification_handler(
    Extension(deps): Extension<ServerDeps>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::not_found("Notification"))?;

    let notification = deps
        .notifications
        .find_notification(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Notification"))?;

    // Broadcasts can only be removed by admins
    let own = notification.recipient.as_deref() == Some(user.email.as_str());
    if !user.is_admin() && !own {
        return Err(ApiError::Forbidden("Access denied".to_string()));
    }

    deps.notifications.delete_notification(id).await?;
    Ok(Json(json!({ "message": "Notification deleted successfully" })))
}
