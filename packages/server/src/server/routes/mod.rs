// HTTP routes
pub mod assignments;
pub mod auth;
pub mod events;
pub mod health;
pub mod history;
pub mod matching;
pub mod notifications;
pub mod profiles;
pub mod reports;

pub use health::*;
