use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::common::{normalize_email, ApiError, ApiResult};
use crate::domains::events::Event;
use crate::domains::matching::{rank_events, rank_volunteers, MatchResult};
use crate::domains::profiles::VolunteerProfile;
use crate::kernel::ServerDeps;
use crate::server::middleware::{AdminUser, AuthUser};

/// Every event ranked for one volunteer, best first
pub async fn matches_for_volunteer_handler(
    Extension(deps): Extension<ServerDeps>,
    user: AuthUser,
    Path(email): Path<String>,
) -> ApiResult<Json<Vec<MatchResult<Event>>>> {
    let email = normalize_email(&email);
    user.ensure_can_access(&email)?;

    let volunteer = deps
        .profiles
        .find_profile(&email)
        .await?
        .ok_or_else(|| ApiError::Missing("Volunteer not found".to_string()))?;
    let events = deps.events.list_events().await?;

    let ranked = rank_events(&volunteer, &events);
    tracing::debug!(email = %email, candidates = ranked.len(), "Ranked events");
    Ok(Json(ranked))
}

/// Every volunteer ranked for one event, best first
pub async fn volunteers_for_event_handler(
    Extension(deps): Extension<ServerDeps>,
    _admin: AdminUser,
    Path(event_name): Path<String>,
) -> ApiResult<Json<Vec<MatchResult<VolunteerProfile>>>> {
    let event = deps
        .events
        .find_event(&event_name)
        .await?
        .ok_or_else(|| ApiError::Missing("Event not found".to_string()))?;
    let volunteers = deps.profiles.list_profiles().await?;

    Ok(Json(rank_volunteers(&event, &volunteers)))
}
