use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::kernel::ServerDeps;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    store: StoreHealth,
}

#[derive(Serialize)]
pub struct StoreHealth {
    backend: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Pings the backing store with a 5 second timeout.
/// Returns 200 OK if it answers, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(deps): Extension<ServerDeps>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status, error) = match tokio::time::timeout(
        std::time::Duration::from_secs(5),
        deps.health.ping(),
    )
    .await
    {
        Ok(Ok(())) => ("ok", None),
        Ok(Err(e)) => ("error", Some(format!("Ping failed: {}", e))),
        Err(_) => ("error", Some("Ping timeout (>5s)".to_string())),
    };

    let is_healthy = error.is_none();

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if is_healthy { "healthy" } else { "unhealthy" }.to_string(),
            store: StoreHealth {
                backend: deps.health.backend().to_string(),
                status: status.to_string(),
                error,
            },
        }),
    )
}
