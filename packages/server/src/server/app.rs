//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::{jwt_auth_middleware, with_auth_rate_limit};
use crate::server::routes::{assignments, auth, events, health_handler, history, matching, notifications, profiles, reports};

/// Build the Axum application router
///
/// `rate_limit` wraps the credential routes in tower-governor; it needs the
/// peer address (`into_make_service_with_connect_info`) or a forwarding header.
pub fn build_app(deps: ServerDeps, rate_limit: bool) -> Router {
    // CORS configuration - allow any origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let jwt_service = deps.jwt_service.clone();

    // Credential routes
    let mut credential_routes = Router::new()
        .route("/signup", post(auth::signup_handler))
        .route("/login", post(auth::login_handler))
        .route("/admin/register", post(auth::admin_register_handler));
    if rate_limit {
        credential_routes = with_auth_rate_limit(credential_routes);
    }

    Router::new()
        .merge(credential_routes)
        .route("/auth/status", get(auth::status_handler))
        .route("/admin/dashboard", get(auth::admin_dashboard_handler))
        // Profiles
        .route(
            "/profile",
            get(profiles::my_profile_handler).post(profiles::create_profile_handler),
        )
        .route("/profiles", get(profiles::list_profiles_handler))
        .route(
            "/profile/:email",
            get(profiles::get_profile_handler)
                .put(profiles::update_profile_handler)
                .delete(profiles::delete_profile_handler),
        )
        .route("/credentials/:email", delete(profiles::delete_credentials_handler))
        // Events
        .route(
            "/events",
            get(events::list_events_handler).post(events::save_event_handler),
        )
        .route(
            "/events/:event_name",
            get(events::get_event_handler).delete(events::delete_event_handler),
        )
        // Volunteer history
        .route(
            "/volunteer-history",
            get(history::list_history_handler).post(history::save_history_handler),
        )
        .route(
            "/volunteer-history/:event_name",
            get(history::get_history_handler).delete(history::delete_history_handler),
        )
        // Matching
        .route("/api/matches/:email", get(matching::matches_for_volunteer_handler))
        .route("/api/volunteers/:event_name", get(matching::volunteers_for_event_handler))
        // Event users
        .route("/api/event-users", post(assignments::assign_handler))
        .route(
            "/api/event-users/event/:event_name",
            get(assignments::list_for_event_handler),
        )
        .route("/api/event-users/user/:email", get(assignments::list_for_user_handler))
        .route(
            "/api/event-users/:event_name/:email",
            delete(assignments::unassign_handler),
        )
        // Notifications
        .route(
            "/notifications",
            get(notifications::list_notifications_handler)
                .post(notifications::create_notification_handler),
        )
        .route("/notifications/:id", delete(notifications::delete_notification_handler))
        // Reports
        .route("/reports/events", get(reports::event_report_handler))
        // Health check (no auth)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        })) // JWT authentication
        .layer(Extension(deps)) // Shared dependencies
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
