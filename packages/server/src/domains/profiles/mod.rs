//! Profiles domain - volunteer profile form

pub mod models;

pub use models::{ProfileInput, VolunteerProfile};
