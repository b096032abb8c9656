use axum::{extract::Extension, Json};
use chrono::Utc;

use crate::common::ApiResult;
use crate::domains::reports::{event_report, EventReportRow};
use crate::kernel::ServerDeps;
use crate::server::middleware::AdminUser;

pub async fn event_report_handler(
    Extension(deps): Extension<ServerDeps>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<EventReportRow>>> {
    Ok(Json(event_report(Utc::now().naive_utc(), &deps).await?))
}
