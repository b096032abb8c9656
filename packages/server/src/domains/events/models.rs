use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::null_as_default;

/// How urgently an event needs volunteers.
///
/// Labels outside the fixed set deserialize to `Unknown` so stored or imported
/// data never fails to load; `Unknown` carries no matching weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Urgency {
    pub const LABELS: [&'static str; 4] = ["Low", "Medium", "High", "Critical"];

    /// Lenient parse: unrecognized labels become `Unknown`
    pub fn parse(label: &str) -> Self {
        match label {
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            "High" => Self::High,
            "Critical" => Self::Critical,
            _ => Self::Unknown,
        }
    }

    /// Points added to a match score
    pub fn weight(self) -> u32 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
            Self::Unknown => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location string used for events that are not tied to a place
pub const REMOTE_LOCATION: &str = "remote";

/// A volunteer event managed by admins.
///
/// `location` is either `"{city}, {state}"` or `"remote"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub urgency: Urgency,
    #[serde(with = "event_date_time")]
    pub date_time: NaiveDateTime,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn is_remote(&self) -> bool {
        self.location.eq_ignore_ascii_case(REMOTE_LOCATION)
    }

    /// Upcoming relative to `now`
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.date_time > now
    }
}

/// Builds the stored location string from its parts
pub fn compose_location(city: &str, state: &str, remote: bool) -> String {
    if remote {
        REMOTE_LOCATION.to_string()
    } else {
        format!("{}, {}", city.trim(), state.trim())
    }
}

/// Serde adapter for event date-times.
///
/// Writes `YYYY-MM-DDTHH:MM:SS`; reads that, the same without seconds, a space
/// separator, an RFC 3339 timestamp, or a bare date (midnight).
pub mod event_date_time {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
    const ACCEPTED: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date-time: {}", raw)))
    }

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        for format in ACCEPTED {
            if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(value);
            }
        }
        if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
            return Some(value.naive_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }
}
