use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;

use super::models::{compose_location, Event, Urgency};
use crate::common::validation::{len_between, parse_date, parse_time, ValidationErrors};

/// Event form submitted by admins.
///
/// Fields are loosely typed so every problem is reported at once rather than
/// failing deserialization on the first bad field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub event_description: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub required_skills: serde_json::Value,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub event_time: String,
}

impl EventInput {
    /// Validates the form against `now` and builds the event on success.
    pub fn validate(&self, now: NaiveDateTime) -> Result<Event, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check(
            len_between(&self.event_name, 1, 100),
            "eventName",
            "Event name is required and must be between 1 and 100 characters.",
        );
        errors.check(
            len_between(&self.event_description, 1, 500),
            "eventDescription",
            "Event description is required and must be between 1 and 500 characters.",
        );
        if !self.remote {
            errors.check(!self.state.trim().is_empty(), "state", "State is required.");
            errors.check(!self.city.trim().is_empty(), "city", "City is required.");
        }

        let required_skills = string_array(&self.required_skills);
        errors.check(
            required_skills.is_some(),
            "requiredSkills",
            "Required skills must be an array.",
        );
        errors.check(
            Urgency::LABELS.contains(&self.urgency.as_str()),
            "urgency",
            "Urgency must be one of: Low, Medium, High, Critical.",
        );

        let date = parse_date(&self.event_date);
        errors.check(
            date.is_some(),
            "eventDate",
            "Event date must be a valid date in ISO 8601 format.",
        );
        let time = parse_time(&self.event_time);
        errors.check(
            time.is_some(),
            "eventTime",
            "Event time must be a valid time in HH:mm format.",
        );

        let date_time = match (date, time) {
            (Some(date), Some(time)) => {
                let date_time = date.and_time(time);
                errors.check(
                    date_time >= now,
                    "eventTime",
                    "Event date and time cannot be in the past.",
                );
                Some(date_time)
            }
            _ => None,
        };

        errors.into_result()?;

        let now_utc = Utc::now();
        Ok(Event {
            event_name: self.event_name.trim().to_string(),
            event_description: self.event_description.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            location: compose_location(&self.city, &self.state, self.remote),
            required_skills: required_skills.unwrap_or_default(),
            urgency: Urgency::parse(&self.urgency),
            date_time: date_time.unwrap_or(now),
            created_at: now_utc,
            updated_at: now_utc,
        })
    }
}

/// Accepts a JSON array of strings; anything else is rejected
pub(crate) fn string_array(value: &serde_json::Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(|s| s.trim().to_string()))
        .collect()
}
