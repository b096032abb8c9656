//! In-memory store used for development (no `DATABASE_URL`) and tests.
//!
//! All collections live behind one `RwLock`, so each trait call is atomic.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domains::assignments::Assignment;
use crate::domains::auth::UserCredential;
use crate::domains::events::Event;
use crate::domains::history::VolunteerHistoryEntry;
use crate::domains::notifications::Notification;
use crate::domains::profiles::VolunteerProfile;
use crate::kernel::traits::{
    BaseAccountStore, BaseAssignmentStore, BaseEventStore, BaseHealthCheck, BaseHistoryStore,
    BaseNotificationStore, BaseProfileStore,
};

#[derive(Default)]
struct MemoryState {
    accounts: BTreeMap<String, UserCredential>,
    profiles: BTreeMap<String, VolunteerProfile>,
    events: BTreeMap<String, Event>,
    // (email, event_name)
    history: BTreeMap<(String, String), VolunteerHistoryEntry>,
    assignments: Vec<Assignment>,
    notifications: Vec<Notification>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_events(events: &mut [Event]) {
    events.sort_by(|a, b| {
        a.date_time
            .cmp(&b.date_time)
            .then_with(|| a.event_name.cmp(&b.event_name))
    });
}

#[async_trait]
impl BaseAccountStore for InMemoryStore {
    async fn find_account(&self, email: &str) -> Result<Option<UserCredential>> {
        Ok(self.state.read().await.accounts.get(email).cloned())
    }

    async fn insert_account(&self, account: &UserCredential) -> Result<bool> {
        let mut state = self.state.write().await;
        if state.accounts.contains_key(&account.email) {
            return Ok(false);
        }
        state.accounts.insert(account.email.clone(), account.clone());
        Ok(true)
    }

    async fn delete_account(&self, email: &str) -> Result<bool> {
        Ok(self.state.write().await.accounts.remove(email).is_some())
    }
}

#[async_trait]
impl BaseProfileStore for InMemoryStore {
    async fn find_profile(&self, email: &str) -> Result<Option<VolunteerProfile>> {
        Ok(self.state.read().await.profiles.get(email).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<VolunteerProfile>> {
        Ok(self.state.read().await.profiles.values().cloned().collect())
    }

    async fn insert_profile(&self, profile: &VolunteerProfile) -> Result<bool> {
        let mut state = self.state.write().await;
        if state.profiles.contains_key(&profile.email) {
            return Ok(false);
        }
        state.profiles.insert(profile.email.clone(), profile.clone());
        Ok(true)
    }

    async fn update_profile(&self, profile: &VolunteerProfile) -> Result<bool> {
        let mut state = self.state.write().await;
        match state.profiles.get_mut(&profile.email) {
            Some(existing) => {
                *existing = profile.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_profile(&self, email: &str) -> Result<bool> {
        Ok(self.state.write().await.profiles.remove(email).is_some())
    }
}

#[async_trait]
impl BaseEventStore for InMemoryStore {
    async fn find_event(&self, event_name: &str) -> Result<Option<Event>> {
        Ok(self.state.read().await.events.get(event_name).cloned())
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self.state.read().await.events.values().cloned().collect();
        sort_events(&mut events);
        Ok(events)
    }

    async fn events_starting_between(
        &self,
        after: NaiveDateTime,
        until: NaiveDateTime,
    ) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self
            .state
            .read()
            .await
            .events
            .values()
            .filter(|e| e.date_time > after && e.date_time <= until)
            .cloned()
            .collect();
        sort_events(&mut events);
        Ok(events)
    }

    async fn upsert_event(&self, event: &Event) -> Result<bool> {
        let mut state = self.state.write().await;
        match state.events.get_mut(&event.event_name) {
            Some(existing) => {
                let created_at = existing.created_at;
                *existing = Event {
                    created_at,
                    ..event.clone()
                };
                Ok(true)
            }
            None => {
                state.events.insert(event.event_name.clone(), event.clone());
                Ok(false)
            }
        }
    }

    async fn delete_event(&self, event_name: &str) -> Result<bool> {
        Ok(self.state.write().await.events.remove(event_name).is_some())
    }
}

#[async_trait]
impl BaseHistoryStore for InMemoryStore {
    async fn find_entry(
        &self,
        email: &str,
        event_name: &str,
    ) -> Result<Option<VolunteerHistoryEntry>> {
        let key = (email.to_string(), event_name.to_string());
        Ok(self.state.read().await.history.get(&key).cloned())
    }

    async fn list_entries(&self, email: Option<&str>) -> Result<Vec<VolunteerHistoryEntry>> {
        Ok(self
            .state
            .read()
            .await
            .history
            .values()
            .filter(|entry| email.map_or(true, |e| entry.email == e))
            .cloned()
            .collect())
    }

    async fn list_entries_for_event(
        &self,
        event_name: &str,
    ) -> Result<Vec<VolunteerHistoryEntry>> {
        Ok(self
            .state
            .read()
            .await
            .history
            .values()
            .filter(|entry| entry.event_name == event_name)
            .cloned()
            .collect())
    }

    async fn upsert_entry(&self, entry: &VolunteerHistoryEntry) -> Result<bool> {
        let key = (entry.email.clone(), entry.event_name.clone());
        Ok(self
            .state
            .write()
            .await
            .history
            .insert(key, entry.clone())
            .is_some())
    }

    async fn delete_entry(&self, email: &str, event_name: &str) -> Result<bool> {
        let key = (email.to_string(), event_name.to_string());
        Ok(self.state.write().await.history.remove(&key).is_some())
    }
}

#[async_trait]
impl BaseAssignmentStore for InMemoryStore {
    async fn insert_assignment(&self, assignment: &Assignment) -> Result<bool> {
        let mut state = self.state.write().await;
        let exists = state
            .assignments
            .iter()
            .any(|a| a.event_name == assignment.event_name && a.email == assignment.email);
        if exists {
            return Ok(false);
        }
        state.assignments.push(assignment.clone());
        Ok(true)
    }

    async fn list_assignments_for_event(&self, event_name: &str) -> Result<Vec<Assignment>> {
        Ok(self
            .state
            .read()
            .await
            .assignments
            .iter()
            .filter(|a| a.event_name == event_name)
            .cloned()
            .collect())
    }

    async fn list_assignments_for_user(&self, email: &str) -> Result<Vec<Assignment>> {
        Ok(self
            .state
            .read()
            .await
            .assignments
            .iter()
            .filter(|a| a.email == email)
            .cloned()
            .collect())
    }

    async fn delete_assignment(&self, event_name: &str, email: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        let before = state.assignments.len();
        state
            .assignments
            .retain(|a| !(a.event_name == event_name && a.email == email));
        Ok(state.assignments.len() < before)
    }

    async fn delete_assignments_for_event(&self, event_name: &str) -> Result<u64> {
        let mut state = self.state.write().await;
        let before = state.assignments.len();
        state.assignments.retain(|a| a.event_name != event_name);
        Ok((before - state.assignments.len()) as u64)
    }
}

#[async_trait]
impl BaseNotificationStore for InMemoryStore {
    async fn insert_notification(&self, notification: &Notification) -> Result<()> {
        self.state
            .write()
            .await
            .notifications
            .push(notification.clone());
        Ok(())
    }

    async fn find_notification(&self, id: Uuid) -> Result<Option<Notification>> {
        Ok(self
            .state
            .read()
            .await
            .notifications
            .iter()
            .find(|n| n.id == id)
            .cloned())
    }

    async fn list_notifications_for(&self, email: &str) -> Result<Vec<Notification>> {
        // Stored oldest first; reverse keeps insertion order among equal timestamps
        Ok(self
            .state
            .read()
            .await
            .notifications
            .iter()
            .rev()
            .filter(|n| n.is_visible_to(email))
            .cloned()
            .collect())
    }

    async fn delete_notification(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.write().await;
        let before = state.notifications.len();
        state.notifications.retain(|n| n.id != id);
        Ok(state.notifications.len() < before)
    }
}

#[async_trait]
impl BaseHealthCheck for InMemoryStore {
    async fn ping(&self) -> Result<()> {
        let _state = self.state.read().await;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::events::Urgency;
    use chrono::{NaiveDate, Utc};

    fn event(name: &str, day: u32) -> Event {
        Event {
            event_name: name.to_string(),
            event_description: "desc".to_string(),
            city: "Houston".to_string(),
            state: "TX".to_string(),
            location: "Houston, TX".to_string(),
            required_skills: vec![],
            urgency: Urgency::Low,
            date_time: NaiveDate::from_ymd_opt(2030, 1, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_events_ordered_by_date() {
        let store = InMemoryStore::new();
        store.upsert_event(&event("Later", 20)).await.unwrap();
        store.upsert_event(&event("Sooner", 10)).await.unwrap();

        let names: Vec<String> = store
            .list_events()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.event_name)
            .collect();
        assert_eq!(names, vec!["Sooner", "Later"]);
    }

    #[tokio::test]
    async fn test_upsert_event_keeps_created_at() {
        let store = InMemoryStore::new();
        let original = event("Drive", 10);
        assert!(!store.upsert_event(&original).await.unwrap());

        let mut updated = event("Drive", 11);
        updated.created_at = Utc::now() + chrono::Duration::days(1);
        assert!(store.upsert_event(&updated).await.unwrap());

        let stored = store.find_event("Drive").await.unwrap().unwrap();
        assert_eq!(stored.created_at, original.created_at);
        assert_eq!(stored.date_time, updated.date_time);
    }

    #[tokio::test]
    async fn test_events_starting_between_is_half_open() {
        let store = InMemoryStore::new();
        store.upsert_event(&event("A", 10)).await.unwrap();
        store.upsert_event(&event("B", 11)).await.unwrap();

        let after = event("x", 10).date_time;
        let until = event("x", 11).date_time;
        let found = store.events_starting_between(after, until).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].event_name, "B");
    }

    #[tokio::test]
    async fn test_duplicate_assignment_rejected() {
        let store = InMemoryStore::new();
        let assignment = Assignment {
            event_name: "Drive".into(),
            email: "a@b.co".into(),
            assigned_at: Utc::now(),
        };

        assert!(store.insert_assignment(&assignment).await.unwrap());
        assert!(!store.insert_assignment(&assignment).await.unwrap());
        assert_eq!(store.delete_assignments_for_event("Drive").await.unwrap(), 1);
        assert!(store.list_assignments_for_user("a@b.co").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_notifications_newest_first_and_filtered() {
        let store = InMemoryStore::new();
        let first = Notification::reminder("a@b.co", "One");
        let second = Notification::reminder("other@b.co", "Two");
        let third = Notification::update("a@b.co", "Three");
        for n in [&first, &second, &third] {
            store.insert_notification(n).await.unwrap();
        }

        let visible = store.list_notifications_for("a@b.co").await.unwrap();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].id, third.id);
        assert_eq!(visible[1].id, first.id);

        assert!(store.delete_notification(first.id).await.unwrap());
        assert!(!store.delete_notification(first.id).await.unwrap());
    }
}
