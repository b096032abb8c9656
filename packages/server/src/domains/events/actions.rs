//! Event create/update/delete with their side effects on assignments and
//! notifications.

use anyhow::Result;
use tracing::info;

use super::models::Event;
use crate::domains::notifications::{notify_all, Notification};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    /// Carries how many assigned volunteers were notified
    Updated { notified: usize },
}

/// Create the event, or replace the one with the same name.
///
/// Replacing an event notifies every volunteer assigned to it.
pub async fn save_event(event: &Event, deps: &ServerDeps) -> Result<SaveOutcome> {
    let replaced = deps.events.upsert_event(event).await?;
    if !replaced {
        info!(event = %event.event_name, "Event created");
        return Ok(SaveOutcome::Created);
    }

    let assigned = deps
        .assignments
        .list_assignments_for_event(&event.event_name)
        .await?;
    let notifications: Vec<Notification> = assigned
        .iter()
        .map(|a| Notification::update(&a.email, &event.event_name))
        .collect();
    let notified = notify_all(&notifications, deps).await?;

    info!(
        event = %event.event_name,
        notified,
        "Event updated"
    );
    Ok(SaveOutcome::Updated { notified })
}

/// Delete the event and its assignments. Returns false if it did not exist.
pub async fn delete_event(event_name: &str, deps: &ServerDeps) -> Result<bool> {
    if !deps.events.delete_event(event_name).await? {
        return Ok(false);
    }
    let removed = deps
        .assignments
        .delete_assignments_for_event(event_name)
        .await?;
    info!(event = %event_name, assignments_removed = removed, "Event deleted");
    Ok(true)
}
