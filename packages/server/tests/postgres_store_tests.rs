//! Postgres store tests. Need Docker: `cargo test -- --ignored`.

mod common;

use chrono::{Duration, NaiveDate, Utc};
use common::TestHarness;
use test_context::test_context;
use uuid::Uuid;
use volunteer_core::domains::assignments::Assignment;
use volunteer_core::domains::auth::{Role, UserCredential};
use volunteer_core::domains::events::{Event, Urgency};
use volunteer_core::domains::history::{ParticipationStatus, VolunteerHistoryEntry};
use volunteer_core::domains::notifications::Notification;
use volunteer_core::domains::profiles::VolunteerProfile;
use volunteer_core::kernel::{
    BaseAccountStore, BaseAssignmentStore, BaseEventStore, BaseHealthCheck, BaseHistoryStore,
    BaseNotificationStore, BaseProfileStore,
};

/// Unique per test; the database is shared by every test in the run
fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

fn event(name: &str) -> Event {
    Event {
        event_name: name.to_string(),
        event_description: "Sorting cans".to_string(),
        city: "Houston".to_string(),
        state: "TX".to_string(),
        location: "Houston, TX".to_string(),
        required_skills: vec!["Teamwork".to_string()],
        urgency: Urgency::High,
        date_time: NaiveDate::from_ymd_opt(2030, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires Docker"]
async fn accounts_round_trip(ctx: &TestHarness) {
    let email = format!("{}@example.edu", unique("ava"));
    let account = UserCredential {
        email: email.clone(),
        password_hash: "salt$hash".to_string(),
        role: Role::Admin,
        created_at: Utc::now(),
    };

    assert!(ctx.store.insert_account(&account).await.unwrap());
    assert!(!ctx.store.insert_account(&account).await.unwrap());

    let shouted = UserCredential {
        email: email.to_uppercase(),
        ..account.clone()
    };
    assert!(!ctx.store.insert_account(&shouted).await.unwrap());

    let found = ctx.store.find_account(&email).await.unwrap().unwrap();
    assert_eq!(found.role, Role::Admin);
    assert_eq!(found.password_hash, "salt$hash");

    assert!(ctx.store.delete_account(&email).await.unwrap());
    assert!(ctx.store.find_account(&email).await.unwrap().is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires Docker"]
async fn profiles_keep_arrays(ctx: &TestHarness) {
    let email = format!("{}@example.edu", unique("ava"));
    let mut profile = VolunteerProfile {
        email: email.clone(),
        full_name: "Ava Anderson".to_string(),
        state: "TX".to_string(),
        skills: vec!["Leadership".to_string(), "Teamwork".to_string()],
        availability: vec![NaiveDate::from_ymd_opt(2030, 6, 15).unwrap()],
        ..Default::default()
    };

    assert!(ctx.store.insert_profile(&profile).await.unwrap());
    assert_eq!(ctx.store.find_profile(&email).await.unwrap().unwrap(), profile);

    profile.preferences = "remote".to_string();
    assert!(ctx.store.update_profile(&profile).await.unwrap());
    assert_eq!(
        ctx.store.find_profile(&email).await.unwrap().unwrap().preferences,
        "remote"
    );

    assert!(ctx.store.delete_profile(&email).await.unwrap());
    assert!(!ctx.store.update_profile(&profile).await.unwrap());
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires Docker"]
async fn events_upsert_and_window(ctx: &TestHarness) {
    let name = unique("Food Drive");
    let mut drive = event(&name);

    assert!(!ctx.store.upsert_event(&drive).await.unwrap());
    drive.urgency = Urgency::Critical;
    assert!(ctx.store.upsert_event(&drive).await.unwrap());

    let found = ctx.store.find_event(&name).await.unwrap().unwrap();
    assert_eq!(found.urgency, Urgency::Critical);
    assert_eq!(found.date_time, drive.date_time);

    let starts = drive.date_time;
    let window = ctx
        .store
        .events_starting_between(starts - Duration::hours(1), starts)
        .await
        .unwrap();
    assert!(window.iter().any(|e| e.event_name == name));

    let excluded = ctx
        .store
        .events_starting_between(starts, starts + Duration::hours(1))
        .await
        .unwrap();
    assert!(!excluded.iter().any(|e| e.event_name == name));

    assert!(ctx.store.delete_event(&name).await.unwrap());
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires Docker"]
async fn assignments_cascade_with_event(ctx: &TestHarness) {
    let name = unique("Park Cleanup");
    let email = format!("{}@example.edu", unique("ava"));
    ctx.store.upsert_event(&event(&name)).await.unwrap();

    let assignment = Assignment {
        event_name: name.clone(),
        email: email.clone(),
        assigned_at: Utc::now(),
    };
    assert!(ctx.store.insert_assignment(&assignment).await.unwrap());
    assert!(!ctx.store.insert_assignment(&assignment).await.unwrap());
    assert_eq!(ctx.store.list_assignments_for_user(&email).await.unwrap().len(), 1);

    ctx.store.delete_event(&name).await.unwrap();
    assert!(ctx.store.list_assignments_for_event(&name).await.unwrap().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires Docker"]
async fn history_upsert_and_scope(ctx: &TestHarness) {
    let email = format!("{}@example.edu", unique("ava"));
    let mut entry = VolunteerHistoryEntry {
        email: email.clone(),
        event_name: unique("Beach Cleanup"),
        event_description: "Clean the beach".to_string(),
        location: "Galveston, TX".to_string(),
        required_skills: vec![],
        urgency: Urgency::Low,
        event_date: NaiveDate::from_ymd_opt(2024, 11, 10).unwrap(),
        participation_status: ParticipationStatus::Pending,
    };

    assert!(!ctx.store.upsert_entry(&entry).await.unwrap());
    entry.participation_status = ParticipationStatus::Completed;
    assert!(ctx.store.upsert_entry(&entry).await.unwrap());

    let mine = ctx.store.list_entries(Some(&email)).await.unwrap();
    assert_eq!(mine, vec![entry.clone()]);
    assert_eq!(
        ctx.store
            .list_entries_for_event(&entry.event_name)
            .await
            .unwrap()
            .len(),
        1
    );

    assert!(ctx.store.delete_entry(&email, &entry.event_name).await.unwrap());
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires Docker"]
async fn notifications_visible_to_recipient(ctx: &TestHarness) {
    let email = format!("{}@example.edu", unique("ava"));
    let note = Notification::assignment(&email, "Food Drive");

    ctx.store.insert_notification(&note).await.unwrap();

    let inbox = ctx.store.list_notifications_for(&email).await.unwrap();
    assert!(inbox.iter().any(|n| n.id == note.id));

    let other = ctx
        .store
        .list_notifications_for("someone-else@example.edu")
        .await
        .unwrap();
    assert!(!other.iter().any(|n| n.id == note.id));

    assert!(ctx.store.delete_notification(note.id).await.unwrap());
    assert!(ctx.store.find_notification(note.id).await.unwrap().is_none());

    ctx.store.ping().await.unwrap();
    assert_eq!(ctx.store.backend(), "postgres");
}
