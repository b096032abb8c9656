// Volunteer Matching - API Core
//
// Backend for registering volunteers, managing events and matching the two.
// Domain logic lives in domains/*, storage behind kernel traits, HTTP in server/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
