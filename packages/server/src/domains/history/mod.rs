//! Volunteer history domain - past and pending participation records

pub mod models;

pub use models::{HistoryInput, ParticipationStatus, VolunteerHistoryEntry};
