//! Account routes: signup, login, admin registration and session status

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::common::{ApiError, ApiResult, JsonBody, ValidationErrors};
use crate::domains::auth::{login, register_account, CredentialsInput, RegisterOutcome, Role};
use crate::kernel::ServerDeps;
use crate::server::middleware::{AdminUser, AuthUser};

#[derive(Serialize)]
pub struct LoginResponse {
    token: String,
    msg: String,
    role: Role,
}

async fn register(input: &CredentialsInput, role: Role, deps: &ServerDeps) -> ApiResult<(StatusCode, Json<Value>)> {
    input.validate_registration()?;

    match register_account(&input.email, &input.password, role, deps).await? {
        RegisterOutcome::Registered => Ok((
            StatusCode::CREATED,
            Json(json!({ "msg": "User registered successfully" })),
        )),
        RegisterOutcome::AlreadyExists => Err(ApiError::Conflict("User already exists".to_string())),
    }
}

pub async fn signup_handler(
    Extension(deps): Extension<ServerDeps>,
    JsonBody(input): JsonBody<CredentialsInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    register(&input, Role::Volunteer, &deps).await
}

pub async fn admin_register_handler(
    Extension(deps): Extension<ServerDeps>,
    AdminUser(admin): AdminUser,
    JsonBody(input): JsonBody<CredentialsInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    tracing::info!(by = %admin.email, email = %input.email(), "Admin registration");
    register(&input, Role::Admin, &deps).await
}

pub async fn login_handler(
    Extension(deps): Extension<ServerDeps>,
    JsonBody(input): JsonBody<CredentialsInput>,
) -> ApiResult<Json<LoginResponse>> {
    input.validate_login()?;

    let Some(session) = login(&input.email, &input.password, &deps).await? else {
        let mut errors = ValidationErrors::new();
        errors.add("credentials", "Invalid credentials");
        return Err(errors.into());
    };

    Ok(Json(LoginResponse {
        token: session.token,
        msg: "Logged in successfully".to_string(),
        role: session.role,
    }))
}

pub async fn status_handler(user: Option<AuthUser>) -> Json<Value> {
    match user {
        Some(user) => Json(json!({
            "isAuthenticated": true,
            "user": { "email": user.email, "role": user.role },
        })),
        None => Json(json!({ "isAuthenticated": false, "user": null })),
    }
}

pub async fn admin_dashboard_handler(AdminUser(admin): AdminUser) -> Json<Value> {
    Json(json!({
        "message": "Welcome to the admin dashboard",
        "user": { "email": admin.email, "role": admin.role },
        "features": [
            "Manage events",
            "Match volunteers to events",
            "Send notifications",
            "View event reports",
        ],
    }))
}
