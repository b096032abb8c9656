//! Pure scoring functions for volunteer/event matching
//!
//! These functions contain NO side effects and never fail. Absent data simply
//! contributes nothing to the score.

use serde::Serialize;
use std::collections::HashSet;

use crate::domains::events::Event;
use crate::domains::profiles::VolunteerProfile;

/// Points per skill shared by volunteer and event
pub const SKILL_POINTS: u32 = 2;
/// Points when the volunteer is available on the event's calendar date
pub const AVAILABILITY_POINTS: u32 = 3;
/// Points when the volunteer's preferences mention the event's work type
pub const PREFERENCE_POINTS: u32 = 2;
/// Points when volunteer and event share city and state
pub const LOCATION_POINTS: u32 = 2;

/// A scored item; serializes as the item's own fields plus `matchScore`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult<T> {
    #[serde(flatten)]
    pub item: T,
    pub match_score: u32,
}

/// Score how well a volunteer fits an event.
///
/// Additive, no cap:
/// - 2 per shared skill (set intersection, exact spelling)
/// - 3 if any availability date is the event's calendar date
/// - 2 if preferences mention "remote" for remote events, "in-person" otherwise
/// - 2 if city and state match the event location (case-insensitive)
/// - urgency weight (Low=1 .. Critical=4, unknown=0)
///
/// # Examples
/// ```
/// use volunteer_core::domains::events::{Event, Urgency};
/// use volunteer_core::domains::matching::score;
/// use volunteer_core::domains::profiles::VolunteerProfile;
///
/// let volunteer = VolunteerProfile::empty("a@b.co");
/// let event: Event = serde_json::from_str(
///     r#"{"eventName":"Drive","dateTime":"2024-09-15T10:00","location":"remote","urgency":"Low"}"#,
/// ).unwrap();
/// assert_eq!(score(&volunteer, &event), 1);
/// ```
pub fn score(volunteer: &VolunteerProfile, event: &Event) -> u32 {
    skill_points(volunteer, event)
        + availability_points(volunteer, event)
        + preference_points(volunteer, event)
        + location_points(volunteer, event)
        + event.urgency.weight()
}

fn skill_points(volunteer: &VolunteerProfile, event: &Event) -> u32 {
    let offered: HashSet<&str> = volunteer.skills.iter().map(String::as_str).collect();
    let required: HashSet<&str> = event.required_skills.iter().map(String::as_str).collect();
    offered.intersection(&required).count() as u32 * SKILL_POINTS
}

fn availability_points(volunteer: &VolunteerProfile, event: &Event) -> u32 {
    let event_date = event.date_time.date();
    if volunteer.availability.iter().any(|date| *date == event_date) {
        AVAILABILITY_POINTS
    } else {
        0
    }
}

fn preference_points(volunteer: &VolunteerProfile, event: &Event) -> u32 {
    let work_type = if event.is_remote() {
        "remote"
    } else {
        "in-person"
    };
    if volunteer.preferences.to_lowercase().contains(work_type) {
        PREFERENCE_POINTS
    } else {
        0
    }
}

fn location_points(volunteer: &VolunteerProfile, event: &Event) -> u32 {
    // "City, ST"; anything without the separator (including "remote") scores nothing
    let mut parts = event.location.split(", ");
    let (Some(city), Some(state)) = (parts.next(), parts.next()) else {
        return 0;
    };

    if volunteer.city.to_lowercase() == city.to_lowercase()
        && volunteer.state.to_lowercase() == state.to_lowercase()
    {
        LOCATION_POINTS
    } else {
        0
    }
}

/// Score every event for one volunteer, best first.
///
/// The sort is stable: events with equal scores keep their input order.
pub fn rank_events(volunteer: &VolunteerProfile, events: &[Event]) -> Vec<MatchResult<Event>> {
    rank(events.iter().map(|event| MatchResult {
        match_score: score(volunteer, event),
        item: event.clone(),
    }))
}

/// Score every volunteer for one event, best first (stable).
pub fn rank_volunteers(
    event: &Event,
    volunteers: &[VolunteerProfile],
) -> Vec<MatchResult<VolunteerProfile>> {
    rank(volunteers.iter().map(|volunteer| MatchResult {
        match_score: score(volunteer, event),
        item: volunteer.clone(),
    }))
}

fn rank<T>(results: impl Iterator<Item = MatchResult<T>>) -> Vec<MatchResult<T>> {
    let mut results: Vec<_> = results.collect();
    results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    results
}
