// Business domains
pub mod assignments;
pub mod auth;
pub mod events;
pub mod history;
pub mod matching;
pub mod notifications;
pub mod profiles;
pub mod reports;
