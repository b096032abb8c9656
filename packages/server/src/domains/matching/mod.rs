//! Matching domain - scores volunteers against events
//!
//! Everything here is pure: callers load volunteers and events from whatever
//! store they use and pass them in explicitly.

pub mod scoring;

pub use scoring::{rank_events, rank_volunteers, score, MatchResult};
