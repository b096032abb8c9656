//! Postgres-backed store (sqlx).
//!
//! Enum columns are stored as their labels in TEXT columns and converted at
//! the row boundary.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domains::assignments::Assignment;
use crate::domains::auth::{Role, UserCredential};
use crate::domains::events::{Event, Urgency};
use crate::domains::history::{ParticipationStatus, VolunteerHistoryEntry};
use crate::domains::notifications::{Notification, NotificationType};
use crate::domains::profiles::VolunteerProfile;
use crate::kernel::traits::{
    BaseAccountStore, BaseAssignmentStore, BaseEventStore, BaseHealthCheck, BaseHistoryStore,
    BaseNotificationStore, BaseProfileStore,
};

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// =============================================================================
// Row types
// =============================================================================

#[derive(sqlx::FromRow)]
struct CredentialRow {
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl From<CredentialRow> for UserCredential {
    fn from(row: CredentialRow) -> Self {
        Self {
            email: row.email,
            password_hash: row.password_hash,
            role: Role::parse(&row.role),
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    email: String,
    full_name: String,
    address1: String,
    address2: String,
    city: String,
    state: String,
    zip_code: String,
    skills: Vec<String>,
    preferences: String,
    availability: Vec<NaiveDate>,
}

impl From<ProfileRow> for VolunteerProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            email: row.email,
            full_name: row.full_name,
            address1: row.address1,
            address2: row.address2,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            skills: row.skills,
            preferences: row.preferences,
            availability: row.availability,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EventRow {
    event_name: String,
    event_description: String,
    city: String,
    state: String,
    location: String,
    required_skills: Vec<String>,
    urgency: String,
    date_time: NaiveDateTime,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            event_name: row.event_name,
            event_description: row.event_description,
            city: row.city,
            state: row.state,
            location: row.location,
            required_skills: row.required_skills,
            urgency: Urgency::parse(&row.urgency),
            date_time: row.date_time,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct HistoryRow {
    email: String,
    event_name: String,
    event_description: String,
    location: String,
    required_skills: Vec<String>,
    urgency: String,
    event_date: NaiveDate,
    participation_status: String,
}

impl From<HistoryRow> for VolunteerHistoryEntry {
    fn from(row: HistoryRow) -> Self {
        Self {
            email: row.email,
            event_name: row.event_name,
            event_description: row.event_description,
            location: row.location,
            required_skills: row.required_skills,
            urgency: Urgency::parse(&row.urgency),
            event_date: row.event_date,
            // Column has a CHECK constraint; fall back for rows written by hand
            participation_status: ParticipationStatus::parse(&row.participation_status)
                .unwrap_or(ParticipationStatus::Pending),
        }
    }
}

#[derive(sqlx::FromRow)]
struct AssignmentRow {
    event_name: String,
    email: String,
    assigned_at: DateTime<Utc>,
}

impl From<AssignmentRow> for Assignment {
    fn from(row: AssignmentRow) -> Self {
        Self {
            event_name: row.event_name,
            email: row.email,
            assigned_at: row.assigned_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    recipient: Option<String>,
    kind: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            recipient: row.recipient,
            kind: NotificationType::parse(&row.kind).unwrap_or(NotificationType::Update),
            message: row.message,
            created_at: row.created_at,
        }
    }
}

const EVENT_COLUMNS: &str = "event_name, event_description, city, state, location, \
     required_skills, urgency, date_time, created_at, updated_at";

const HISTORY_COLUMNS: &str = "email, event_name, event_description, location, \
     required_skills, urgency, event_date, participation_status";

// =============================================================================
// Accounts
// =============================================================================

#[async_trait]
impl BaseAccountStore for PostgresStore {
    async fn find_account(&self, email: &str) -> Result<Option<UserCredential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT email, password_hash, role, created_at FROM user_credentials WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn insert_account(&self, account: &UserCredential) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO user_credentials (email, password_hash, role, created_at)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT DO NOTHING",
        )
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .bind(account.created_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete_account(&self, email: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user_credentials WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Profiles
// =============================================================================

#[async_trait]
impl BaseProfileStore for PostgresStore {
    async fn find_profile(&self, email: &str) -> Result<Option<VolunteerProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>("SELECT * FROM user_profiles WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn list_profiles(&self) -> Result<Vec<VolunteerProfile>> {
        let rows = sqlx::query_as::<_, ProfileRow>("SELECT * FROM user_profiles ORDER BY email")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_profile(&self, profile: &VolunteerProfile) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO user_profiles (
                email, full_name, address1, address2, city, state, zip_code,
                skills, preferences, availability
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT DO NOTHING",
        )
        .bind(&profile.email)
        .bind(&profile.full_name)
        .bind(&profile.address1)
        .bind(&profile.address2)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(&profile.zip_code)
        .bind(&profile.skills)
        .bind(&profile.preferences)
        .bind(&profile.availability)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn update_profile(&self, profile: &VolunteerProfile) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE user_profiles
             SET full_name = $2, address1 = $3, address2 = $4, city = $5, state = $6,
                 zip_code = $7, skills = $8, preferences = $9, availability = $10
             WHERE email = $1",
        )
        .bind(&profile.email)
        .bind(&profile.full_name)
        .bind(&profile.address1)
        .bind(&profile.address2)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(&profile.zip_code)
        .bind(&profile.skills)
        .bind(&profile.preferences)
        .bind(&profile.availability)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_profile(&self, email: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user_profiles WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Events
// =============================================================================

#[async_trait]
impl BaseEventStore for PostgresStore {
    async fn find_event(&self, event_name: &str) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {} FROM events WHERE event_name = $1",
            EVENT_COLUMNS
        ))
        .bind(event_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {} FROM events ORDER BY date_time, event_name",
            EVENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn events_starting_between(
        &self,
        after: NaiveDateTime,
        until: NaiveDateTime,
    ) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {} FROM events
             WHERE date_time > $1 AND date_time <= $2
             ORDER BY date_time, event_name",
            EVENT_COLUMNS
        ))
        .bind(after)
        .bind(until)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn upsert_event(&self, event: &Event) -> Result<bool> {
        // xmax = 0 only for freshly inserted rows
        let (replaced,): (bool,) = sqlx::query_as(
            "INSERT INTO events (
                event_name, event_description, city, state, location,
                required_skills, urgency, date_time, created_at, updated_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (event_name) DO UPDATE SET
                event_description = EXCLUDED.event_description,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                location = EXCLUDED.location,
                required_skills = EXCLUDED.required_skills,
                urgency = EXCLUDED.urgency,
                date_time = EXCLUDED.date_time,
                updated_at = EXCLUDED.updated_at
             RETURNING (xmax <> 0)",
        )
        .bind(&event.event_name)
        .bind(&event.event_description)
        .bind(&event.city)
        .bind(&event.state)
        .bind(&event.location)
        .bind(&event.required_skills)
        .bind(event.urgency.as_str())
        .bind(event.date_time)
        .bind(event.created_at)
        .bind(event.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(replaced)
    }

    async fn delete_event(&self, event_name: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE event_name = $1")
            .bind(event_name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Volunteer history
// =============================================================================

#[async_trait]
impl BaseHistoryStore for PostgresStore {
    async fn find_entry(
        &self,
        email: &str,
        event_name: &str,
    ) -> Result<Option<VolunteerHistoryEntry>> {
        let row = sqlx::query_as::<_, HistoryRow>(&format!(
            "SELECT {} FROM volunteer_history WHERE email = $1 AND event_name = $2",
            HISTORY_COLUMNS
        ))
        .bind(email)
        .bind(event_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn list_entries(&self, email: Option<&str>) -> Result<Vec<VolunteerHistoryEntry>> {
        let rows = sqlx::query_as::<_, HistoryRow>(&format!(
            "SELECT {} FROM volunteer_history
             WHERE $1::TEXT IS NULL OR email = $1
             ORDER BY email, event_name",
            HISTORY_COLUMNS
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_entries_for_event(
        &self,
        event_name: &str,
    ) -> Result<Vec<VolunteerHistoryEntry>> {
        let rows = sqlx::query_as::<_, HistoryRow>(&format!(
            "SELECT {} FROM volunteer_history WHERE event_name = $1 ORDER BY email",
            HISTORY_COLUMNS
        ))
        .bind(event_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn upsert_entry(&self, entry: &VolunteerHistoryEntry) -> Result<bool> {
        let (replaced,): (bool,) = sqlx::query_as(
            "INSERT INTO volunteer_history (
                email, event_name, event_description, location,
                required_skills, urgency, event_date, participation_status
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (email, event_name) DO UPDATE SET
                event_description = EXCLUDED.event_description,
                location = EXCLUDED.location,
                required_skills = EXCLUDED.required_skills,
                urgency = EXCLUDED.urgency,
                event_date = EXCLUDED.event_date,
                participation_status = EXCLUDED.participation_status
             RETURNING (xmax <> 0)",
        )
        .bind(&entry.email)
        .bind(&entry.event_name)
        .bind(&entry.event_description)
        .bind(&entry.location)
        .bind(&entry.required_skills)
        .bind(entry.urgency.as_str())
        .bind(entry.event_date)
        .bind(entry.participation_status.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(replaced)
    }

    async fn delete_entry(&self, email: &str, event_name: &str) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM volunteer_history WHERE email = $1 AND event_name = $2")
                .bind(email)
                .bind(event_name)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Assignments
// =============================================================================

#[async_trait]
impl BaseAssignmentStore for PostgresStore {
    async fn insert_assignment(&self, assignment: &Assignment) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO event_users (event_name, email, assigned_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (event_name, email) DO NOTHING",
        )
        .bind(&assignment.event_name)
        .bind(&assignment.email)
        .bind(assignment.assigned_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn list_assignments_for_event(&self, event_name: &str) -> Result<Vec<Assignment>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            "SELECT event_name, email, assigned_at FROM event_users
             WHERE event_name = $1 ORDER BY assigned_at",
        )
        .bind(event_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_assignments_for_user(&self, email: &str) -> Result<Vec<Assignment>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            "SELECT event_name, email, assigned_at FROM event_users
             WHERE email = $1 ORDER BY assigned_at",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_assignment(&self, event_name: &str, email: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM event_users WHERE event_name = $1 AND email = $2")
            .bind(event_name)
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_assignments_for_event(&self, event_name: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM event_users WHERE event_name = $1")
            .bind(event_name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Notifications
// =============================================================================

#[async_trait]
impl BaseNotificationStore for PostgresStore {
    async fn insert_notification(&self, notification: &Notification) -> Result<()> {
        sqlx::query(
            "INSERT INTO notifications (id, recipient, kind, message, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(notification.id)
        .bind(&notification.recipient)
        .bind(notification.kind.as_str())
        .bind(&notification.message)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_notification(&self, id: Uuid) -> Result<Option<Notification>> {
        let row = sqlx::query_as::<_, NotificationRow>(
            "SELECT id, recipient, kind, message, created_at FROM notifications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn list_notifications_for(&self, email: &str) -> Result<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            "SELECT id, recipient, kind, message, created_at FROM notifications
             WHERE recipient IS NULL OR recipient = $1
             ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_notification(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl BaseHealthCheck for PostgresStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
