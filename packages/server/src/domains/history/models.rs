use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::validation::{len_between, parse_date, ValidationErrors};
use crate::domains::events::input::string_array;
use crate::domains::events::Urgency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipationStatus {
    Completed,
    Pending,
    Cancelled,
}

impl ParticipationStatus {
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Completed" => Some(Self::Completed),
            "Pending" => Some(Self::Pending),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// One volunteer's participation in one event, keyed by (email, event name)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerHistoryEntry {
    pub email: String,
    pub event_name: String,
    pub event_description: String,
    pub location: String,
    pub required_skills: Vec<String>,
    pub urgency: Urgency,
    pub event_date: NaiveDate,
    pub participation_status: ParticipationStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryInput {
    /// Admins may record history for another volunteer
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub event_description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub required_skills: serde_json::Value,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub participation_status: String,
}

impl HistoryInput {
    pub fn validate(&self, email: &str) -> Result<VolunteerHistoryEntry, ValidationErrors> {
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
        errors.check(
            !self.location.trim().is_empty(),
            "location",
            "Location is required.",
        );

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

        let event_date = parse_date(&self.event_date);
        errors.check(
            event_date.is_some(),
            "eventDate",
            "Event date must be a valid date in ISO 8601 format.",
        );

        let status = ParticipationStatus::parse(&self.participation_status);
        errors.check(
            status.is_some(),
            "participationStatus",
            "Status must be one of: Completed, Pending, or Cancelled.",
        );

        errors.into_result()?;

        match (event_date, status) {
            (Some(event_date), Some(participation_status)) => Ok(VolunteerHistoryEntry {
                email: email.to_string(),
                event_name: self.event_name.trim().to_string(),
                event_description: self.event_description.trim().to_string(),
                location: self.location.trim().to_string(),
                required_skills: required_skills.unwrap_or_default(),
                urgency: Urgency::parse(&self.urgency),
                event_date,
                participation_status,
            }),
            _ => Err(ValidationErrors::new()),
        }
    }
}
