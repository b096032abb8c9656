use anyhow::Result;
use tracing::info;

use super::models::Assignment;
use crate::domains::notifications::Notification;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    Assigned,
    EventNotFound,
    AlreadyAssigned,
}

/// Register a volunteer for an event and tell them about it.
pub async fn assign_volunteer(assignment: &Assignment, deps: &ServerDeps) -> Result<AssignOutcome> {
    if deps
        .events
        .find_event(&assignment.event_name)
        .await?
        .is_none()
    {
        return Ok(AssignOutcome::EventNotFound);
    }

    if !deps.assignments.insert_assignment(assignment).await? {
        return Ok(AssignOutcome::AlreadyAssigned);
    }

    deps.notifications
        .insert_notification(&Notification::assignment(
            &assignment.email,
            &assignment.event_name,
        ))
        .await?;

    info!(
        event = %assignment.event_name,
        email = %assignment.email,
        "Volunteer assigned"
    );
    Ok(AssignOutcome::Assigned)
}
