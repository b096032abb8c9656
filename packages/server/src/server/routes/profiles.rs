use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::common::{normalize_email, ApiError, ApiResult, JsonBody};
use crate::domains::profiles::{ProfileInput, VolunteerProfile};
use crate::kernel::ServerDeps;
use crate::server::middleware::{AdminUser, AuthUser};

/// Caller's profile; an empty one is created on first visit
pub async fn my_profile_handler(
    Extension(deps): Extension<ServerDeps>,
    user: AuthUser,
) -> ApiResult<(StatusCode, Json<VolunteerProfile>)> {
    if let Some(profile) = deps.profiles.find_profile(&user.email).await? {
        return Ok((StatusCode::OK, Json(profile)));
    }

    let profile = VolunteerProfile::empty(&user.email);
    deps.profiles.insert_profile(&profile).await?;
    tracing::info!(email = %user.email, "Created empty profile");
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn list_profiles_handler(
    Extension(deps): Extension<ServerDeps>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<VolunteerProfile>>> {
    Ok(Json(deps.profiles.list_profiles().await?))
}

pub async fn get_profile_handler(
    Extension(deps): Extension<ServerDeps>,
    user: AuthUser,
    Path(email): Path<String>,
) -> ApiResult<Json<VolunteerProfile>> {
    let email = normalize_email(&email);
    user.ensure_can_access(&email)?;
    deps.profiles
        .find_profile(&email)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Profile"))
}

pub async fn create_profile_handler(
    Extension(deps): Extension<ServerDeps>,
    user: AuthUser,
    JsonBody(input): JsonBody<ProfileInput>,
) -> ApiResult<(StatusCode, Json<VolunteerProfile>)> {
    // Admins may create a profile on someone else's behalf
    let email = match &input.email {
        Some(email) if user.is_admin() => normalize_email(email),
        _ => user.email.clone(),
    };
    let profile = input.validate(&email)?;

    if !deps.profiles.insert_profile(&profile).await? {
        return Err(ApiError::BadRequest(
            "Profile with this email already exists".to_string(),
        ));
    }
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn update_profile_handler(
    Extension(deps): Extension<ServerDeps>,
    user: AuthUser,
    Path(email): Path<String>,
    JsonBody(input): JsonBody<ProfileInput>,
) -> ApiResult<Json<VolunteerProfile>> {
    let email = normalize_email(&email);
    user.ensure_can_access(&email)?;
    let profile = input.validate(&email)?;

    if !deps.profiles.update_profile(&profile).await? {
        return Err(ApiError::not_found("Profile"));
    }
    Ok(Json(profile))
}

pub async fn delete_profile_handler(
    Extension(deps): Extension<ServerDeps>,
    _admin: AdminUser,
    Path(email): Path<String>,
) -> ApiResult<Json<Value>> {
    if !deps.profiles.delete_profile(&normalize_email(&email)).await? {
        return Err(ApiError::not_found("Profile"));
    }
    Ok(Json(json!({ "message": "Profile deleted successfully" })))
}

pub async fn delete_credentials_handler(
    Extension(deps): Extension<ServerDeps>,
    _admin: AdminUser,
    Path(email): Path<String>,
) -> ApiResult<Json<Value>> {
    if !deps.accounts.delete_account(&normalize_email(&email)).await? {
        return Err(ApiError::not_found("User"));
    }
    Ok(Json(json!({ "message": "User credentials deleted successfully" })))
}
