//! Reports domain - event participation summary for admins
//!
//! Joins every event with the history entries recorded against it.

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

use crate::domains::events::Event;
use crate::domains::history::{ParticipationStatus, VolunteerHistoryEntry};
use crate::domains::profiles::VolunteerProfile;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventStatus {
    Upcoming,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportVolunteer {
    pub email: String,
    pub full_name: String,
    pub status: ParticipationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReportRow {
    pub event_name: String,
    pub date: String,
    pub location: String,
    pub description: String,
    pub urgency: String,
    pub skills: String,
    pub volunteers_registered: usize,
    pub volunteers: Vec<ReportVolunteer>,
    pub status: EventStatus,
}

/// Build one report row per event (in event order).
///
/// Names come from profiles; volunteers without a profile get an empty name.
pub fn build_event_report(
    events: &[Event],
    history: &[VolunteerHistoryEntry],
    profiles: &[VolunteerProfile],
    now: NaiveDateTime,
) -> Vec<EventReportRow> {
    let names: HashMap<&str, &str> = profiles
        .iter()
        .map(|p| (p.email.as_str(), p.full_name.as_str()))
        .collect();

    events
        .iter()
        .map(|event| {
            let volunteers: Vec<ReportVolunteer> = history
                .iter()
                .filter(|entry| entry.event_name == event.event_name)
                .map(|entry| ReportVolunteer {
                    email: entry.email.clone(),
                    full_name: names
                        .get(entry.email.as_str())
                        .map(|n| n.to_string())
                        .unwrap_or_default(),
                    status: entry.participation_status,
                })
                .collect();

            EventReportRow {
                event_name: event.event_name.clone(),
                date: event.date_time.format("%Y-%m-%d").to_string(),
                location: event.location.clone(),
                description: event.event_description.clone(),
                urgency: event.urgency.to_string(),
                skills: if event.required_skills.is_empty() {
                    "None".to_string()
                } else {
                    event.required_skills.join(", ")
                },
                volunteers_registered: volunteers.len(),
                volunteers,
                status: if event.is_upcoming(now) {
                    EventStatus::Upcoming
                } else {
                    EventStatus::Completed
                },
            }
        })
        .collect()
}

/// Load everything from the stores and build the report
pub async fn event_report(now: NaiveDateTime, deps: &ServerDeps) -> Result<Vec<EventReportRow>> {
    let events = deps.events.list_events().await?;
    let history = deps.history.list_entries(None).await?;
    let profiles = deps.profiles.list_profiles().await?;
    Ok(build_event_report(&events, &history, &profiles, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::events::Urgency;
    use chrono::{NaiveDate, Utc};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn event(name: &str, day: u32, skills: &[&str]) -> Event {
        Event {
            event_name: name.to_string(),
            event_description: format!("{} description", name),
            city: "Houston".to_string(),
            state: "TX".to_string(),
            location: "Houston, TX".to_string(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            urgency: Urgency::High,
            date_time: at(day),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn entry(email: &str, event_name: &str, status: ParticipationStatus) -> VolunteerHistoryEntry {
        VolunteerHistoryEntry {
            email: email.to_string(),
            event_name: event_name.to_string(),
            event_description: String::new(),
            location: "Houston, TX".to_string(),
            required_skills: vec![],
            urgency: Urgency::High,
            event_date: at(1).date(),
            participation_status: status,
        }
    }

    #[test]
    fn test_report_rows() {
        let events = vec![
            event("Past Drive", 1, &["Teamwork", "Leadership"]),
            event("Future Drive", 20, &[]),
        ];
        let history = vec![
            entry("a@b.co", "Past Drive", ParticipationStatus::Completed),
            entry("b@b.co", "Past Drive", ParticipationStatus::Cancelled),
            entry("a@b.co", "Other", ParticipationStatus::Pending),
        ];
        let profiles = vec![VolunteerProfile {
            email: "a@b.co".to_string(),
            full_name: "Ava Anderson".to_string(),
            ..Default::default()
        }];

        let rows = build_event_report(&events, &history, &profiles, at(10));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, EventStatus::Completed);
        assert_eq!(rows[0].skills, "Teamwork, Leadership");
        assert_eq!(rows[0].volunteers_registered, 2);
        assert_eq!(rows[0].volunteers[0].full_name, "Ava Anderson");
        assert_eq!(rows[0].volunteers[1].full_name, "");
        assert_eq!(rows[0].date, "2024-10-01");

        assert_eq!(rows[1].status, EventStatus::Upcoming);
        assert_eq!(rows[1].skills, "None");
        assert_eq!(rows[1].volunteers_registered, 0);
    }
}
