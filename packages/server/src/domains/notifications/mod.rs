//! Notifications domain - assignment, reminder and update messages

pub mod models;
pub mod reminders;

pub use models::{Notification, NotificationInput, NotificationType};
pub use reminders::send_due_reminders;

use anyhow::Result;

use crate::kernel::ServerDeps;

/// Store a batch of notifications, returning how many were stored
pub async fn notify_all(notifications: &[Notification], deps: &ServerDeps) -> Result<usize> {
    for notification in notifications {
        deps.notifications.insert_notification(notification).await?;
    }
    Ok(notifications.len())
}
