//! Assignments domain - volunteers registered for events

pub mod actions;
pub mod models;

pub use actions::{assign_volunteer, AssignOutcome};
pub use models::{Assignment, AssignmentInput};
