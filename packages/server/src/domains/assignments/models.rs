use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::validation::{is_email, normalize_email, ValidationErrors};

/// A volunteer registered for an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub event_name: String,
    pub email: String,
    pub assigned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentInput {
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub email: String,
}

impl AssignmentInput {
    pub fn validate(&self) -> Result<Assignment, ValidationErrors> {
        let email = normalize_email(&self.email);
        let mut errors = ValidationErrors::new();
        errors.check(
            !self.event_name.trim().is_empty(),
            "eventName",
            "Event name and email are required",
        );
        errors.check(is_email(&email), "email", "Event name and email are required");
        errors.into_result()?;

        Ok(Assignment {
            event_name: self.event_name.trim().to_string(),
            email,
            assigned_at: Utc::now(),
        })
    }
}
