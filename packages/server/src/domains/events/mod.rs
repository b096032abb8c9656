//! Events domain - admin-managed volunteer events

pub mod actions;
pub mod input;
pub mod models;

pub use actions::{delete_event, save_event, SaveOutcome};
pub use input::EventInput;
pub use models::{compose_location, Event, Urgency, REMOTE_LOCATION};
