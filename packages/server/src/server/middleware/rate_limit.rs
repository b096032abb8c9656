// Rate limiting for the credential routes using tower-governor
//
// 10 requests per second per IP with bursts of 20. The key comes from
// X-Forwarded-For / X-Real-IP / Forwarded, falling back to the peer address,
// so the server must be served with connect info.
use std::sync::Arc;

use axum::Router;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tracing::warn;

/// Wrap the credential routes (/signup, /login, /admin/register) in the limiter
pub fn with_auth_rate_limit(router: Router) -> Router {
    let config = GovernorConfigBuilder::default()
        .per_second(10) // Base rate: 10 requests per second
        .burst_size(20) // Allow bursts up to 20
        .use_headers() // Extract IP from forwarding headers
        .finish();

    match config {
        Some(config) => router.layer(GovernorLayer {
            config: Arc::new(config),
        }),
        None => {
            warn!("Rate limiter configuration rejected, serving auth routes unlimited");
            router
        }
    }
}
