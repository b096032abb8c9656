//! Day-before reminders for assigned volunteers.
//!
//! The sweep runs hourly, so the window is one hour wide: events starting in
//! `(now + 23h, now + 24h]` get exactly one reminder per assigned volunteer.

use anyhow::Result;
use chrono::{Duration, NaiveDateTime};
use tracing::{debug, info};

use super::{notify_all, Notification};
use crate::kernel::ServerDeps;

/// Hours before start at which the reminder goes out
pub const REMINDER_LEAD_HOURS: i64 = 24;

/// Width of the window each sweep covers; matches the sweep interval
pub const REMINDER_WINDOW_HOURS: i64 = 1;

/// Send reminders for events entering the reminder window. Returns how many
/// notifications were created.
pub async fn send_due_reminders(now: NaiveDateTime, deps: &ServerDeps) -> Result<usize> {
    let until = now + Duration::hours(REMINDER_LEAD_HOURS);
    let after = until - Duration::hours(REMINDER_WINDOW_HOURS);

    let events = deps.events.events_starting_between(after, until).await?;
    if events.is_empty() {
        debug!("No events due for reminders");
        return Ok(0);
    }

    let mut sent = 0;
    for event in events {
        let assigned = deps
            .assignments
            .list_assignments_for_event(&event.event_name)
            .await?;
        let reminders: Vec<Notification> = assigned
            .iter()
            .map(|a| Notification::reminder(&a.email, &event.event_name))
            .collect();
        let count = notify_all(&reminders, deps).await?;

        info!(event = %event.event_name, count, "Reminders sent");
        sent += count;
    }

    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::assignments::Assignment;
    use crate::domains::auth::JwtService;
    use crate::domains::events::{Event, Urgency};
    use crate::domains::notifications::NotificationType;
    use chrono::{NaiveDate, Utc};
    use std::sync::Arc;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn event(name: &str, starts_in_minutes: i64) -> Event {
        Event {
            event_name: name.to_string(),
            event_description: "desc".to_string(),
            city: String::new(),
            state: String::new(),
            location: "remote".to_string(),
            required_skills: vec![],
            urgency: Urgency::Low,
            date_time: now() + Duration::minutes(starts_in_minutes),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    async fn seed(deps: &ServerDeps, event: Event, email: &str) {
        deps.events.upsert_event(&event).await.unwrap();
        deps.assignments
            .insert_assignment(&Assignment {
                event_name: event.event_name.clone(),
                email: email.to_string(),
                assigned_at: Utc::now(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_only_events_in_window_are_reminded() {
        let deps = ServerDeps::in_memory(Arc::new(JwtService::new("s", "i".into())), vec![]);
        seed(&deps, event("Tomorrow", 23 * 60 + 30), "a@b.co").await;
        seed(&deps, event("Exactly", 24 * 60), "b@b.co").await;
        seed(&deps, event("Too Soon", 23 * 60), "c@b.co").await;
        seed(&deps, event("Too Late", 24 * 60 + 1), "d@b.co").await;

        let sent = send_due_reminders(now(), &deps).await.unwrap();
        assert_eq!(sent, 2);

        let inbox = deps.notifications.list_notifications_for("a@b.co").await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind, NotificationType::Reminder);
        assert!(inbox[0].message.contains("\"Tomorrow\""));

        assert!(deps
            .notifications
            .list_notifications_for("c@b.co")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_no_events_sends_nothing() {
        let deps = ServerDeps::in_memory(Arc::new(JwtService::new("s", "i".into())), vec![]);
        assert_eq!(send_due_reminders(now(), &deps).await.unwrap(), 0);
    }
}
