//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! ```text
//! Scheduler (every hour)
//!     │
//!     └─► send_due_reminders(now)
//!             └─► For each event starting in (23h, 24h] → Reminder per assigned volunteer
//! ```

use anyhow::Result;
use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::notifications::send_due_reminders;
use crate::kernel::ServerDeps;

/// Start all scheduled tasks
pub async fn start_scheduler(deps: ServerDeps) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    // Event reminders - runs at the top of every hour
    let reminder_deps = deps.clone();
    let reminder_job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let deps = reminder_deps.clone();
        Box::pin(async move {
            if let Err(e) = run_reminder_sweep(&deps).await {
                tracing::error!("Reminder task failed: {}", e);
            }
        })
    })?;

    scheduler.add(reminder_job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduled tasks started (event reminders every hour)");
    Ok(scheduler)
}

async fn run_reminder_sweep(deps: &ServerDeps) -> Result<()> {
    tracing::info!("Running reminder sweep");

    let sent = send_due_reminders(Utc::now().naive_utc(), deps).await?;

    if sent == 0 {
        tracing::debug!("No reminders due");
    } else {
        tracing::info!(sent, "Reminders sent");
    }
    Ok(())
}
