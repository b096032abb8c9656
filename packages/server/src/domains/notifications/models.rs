use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::validation::{is_email, len_between, normalize_email, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationType {
    #[serde(rename = "Event Assignment")]
    EventAssignment,
    Reminder,
    Update,
}

impl NotificationType {
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Event Assignment" => Some(Self::EventAssignment),
            "Reminder" => Some(Self::Reminder),
            "Update" => Some(Self::Update),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EventAssignment => "Event Assignment",
            Self::Reminder => "Reminder",
            Self::Update => "Update",
        }
    }
}

/// A message for one volunteer, or for everyone when `recipient` is `None`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub recipient: Option<String>,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(recipient: Option<String>, kind: NotificationType, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient,
            kind,
            message,
            created_at: Utc::now(),
        }
    }

    pub fn assignment(email: &str, event_name: &str) -> Self {
        Self::new(
            Some(email.to_string()),
            NotificationType::EventAssignment,
            format!("You have been assigned to the {} event.", event_name),
        )
    }

    pub fn reminder(email: &str, event_name: &str) -> Self {
        Self::new(
            Some(email.to_string()),
            NotificationType::Reminder,
            format!(
                "Reminder: The event \"{}\" is coming up in 24 hours!",
                event_name
            ),
        )
    }

    pub fn update(email: &str, event_name: &str) -> Self {
        Self::new(
            Some(email.to_string()),
            NotificationType::Update,
            format!(
                "The event \"{}\" has been updated. Please check the latest details.",
                event_name
            ),
        )
    }

    /// Visible to `email` (addressed to them, or a broadcast)
    pub fn is_visible_to(&self, email: &str) -> bool {
        self.recipient.as_deref().map_or(true, |r| r == email)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationInput {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub recipient: Option<String>,
}

impl NotificationInput {
    pub fn validate(&self) -> Result<Notification, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let recipient = self.recipient.as_deref().map(normalize_email);
        let kind = NotificationType::parse(&self.kind);
        errors.check(kind.is_some(), "type", "Invalid notification type.");
        errors.check(
            len_between(&self.message, 1, 255),
            "message",
            "Message must be between 1 and 255 characters.",
        );
        if let Some(recipient) = &recipient {
            errors.check(is_email(recipient), "recipient", "Recipient must be a valid email.");
        }

        errors.into_result()?;

        Ok(Notification::new(
            recipient,
            kind.unwrap_or(NotificationType::Update),
            self.message.clone(),
        ))
    }
}
