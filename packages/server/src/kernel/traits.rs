// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (scoring, notifications on update, reports) lives in domain
// functions that take these traits.
//
// Naming convention: Base* for trait names (e.g., BaseEventStore)

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::domains::assignments::Assignment;
use crate::domains::auth::UserCredential;
use crate::domains::events::Event;
use crate::domains::history::VolunteerHistoryEntry;
use crate::domains::notifications::Notification;
use crate::domains::profiles::VolunteerProfile;

// =============================================================================
// Accounts
// =============================================================================

#[async_trait]
pub trait BaseAccountStore: Send + Sync {
    async fn find_account(&self, email: &str) -> Result<Option<UserCredential>>;

    /// Returns false when an account with this email already exists
    async fn insert_account(&self, account: &UserCredential) -> Result<bool>;

    /// Returns false when no account matched
    async fn delete_account(&self, email: &str) -> Result<bool>;
}

// =============================================================================
// Profiles
// =============================================================================

#[async_trait]
pub trait BaseProfileStore: Send + Sync {
    async fn find_profile(&self, email: &str) -> Result<Option<VolunteerProfile>>;

    /// All profiles ordered by email
    async fn list_profiles(&self) -> Result<Vec<VolunteerProfile>>;

    /// Returns false when a profile with this email already exists
    async fn insert_profile(&self, profile: &VolunteerProfile) -> Result<bool>;

    /// Returns false when no profile matched
    async fn update_profile(&self, profile: &VolunteerProfile) -> Result<bool>;

    async fn delete_profile(&self, email: &str) -> Result<bool>;
}

// =============================================================================
// Events
// =============================================================================

#[async_trait]
pub trait BaseEventStore: Send + Sync {
    async fn find_event(&self, event_name: &str) -> Result<Option<Event>>;

    /// All events ordered by date-time, then name
    async fn list_events(&self) -> Result<Vec<Event>>;

    /// Events starting in `(after, until]`
    async fn events_starting_between(
        &self,
        after: NaiveDateTime,
        until: NaiveDateTime,
    ) -> Result<Vec<Event>>;

    /// Insert or replace by name. Returns true when an existing event was replaced.
    /// A replaced event keeps its original `created_at`.
    async fn upsert_event(&self, event: &Event) -> Result<bool>;

    async fn delete_event(&self, event_name: &str) -> Result<bool>;
}

// =============================================================================
// Volunteer history
// =============================================================================

#[async_trait]
pub trait BaseHistoryStore: Send + Sync {
    async fn find_entry(&self, email: &str, event_name: &str)
        -> Result<Option<VolunteerHistoryEntry>>;

    /// Entries for one volunteer, or every entry when `email` is `None`
    async fn list_entries(&self, email: Option<&str>) -> Result<Vec<VolunteerHistoryEntry>>;

    async fn list_entries_for_event(&self, event_name: &str)
        -> Result<Vec<VolunteerHistoryEntry>>;

    /// Returns true when an existing entry was replaced
    async fn upsert_entry(&self, entry: &VolunteerHistoryEntry) -> Result<bool>;

    async fn delete_entry(&self, email: &str, event_name: &str) -> Result<bool>;
}

// =============================================================================
// Assignments
// =============================================================================

#[async_trait]
pub trait BaseAssignmentStore: Send + Sync {
    /// Returns false when the volunteer is already assigned
    async fn insert_assignment(&self, assignment: &Assignment) -> Result<bool>;

    async fn list_assignments_for_event(&self, event_name: &str) -> Result<Vec<Assignment>>;

    async fn list_assignments_for_user(&self, email: &str) -> Result<Vec<Assignment>>;

    async fn delete_assignment(&self, event_name: &str, email: &str) -> Result<bool>;

    /// Removes every assignment for the event, returning how many were removed
    async fn delete_assignments_for_event(&self, event_name: &str) -> Result<u64>;
}

// =============================================================================
// Notifications
// =============================================================================

#[async_trait]
pub trait BaseNotificationStore: Send + Sync {
    async fn insert_notification(&self, notification: &Notification) -> Result<()>;

    async fn find_notification(&self, id: Uuid) -> Result<Option<Notification>>;

    /// Notifications addressed to `email` plus broadcasts, newest first
    async fn list_notifications_for(&self, email: &str) -> Result<Vec<Notification>>;

    async fn delete_notification(&self, id: Uuid) -> Result<bool>;
}

// =============================================================================
// Health
// =============================================================================

#[async_trait]
pub trait BaseHealthCheck: Send + Sync {
    /// Cheap round trip to the backing store
    async fn ping(&self) -> Result<()>;

    /// Short backend label for health output
    fn backend(&self) -> &'static str;
}
