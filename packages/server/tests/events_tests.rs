//! Integration tests for event management.

mod common;

use common::{error_fields, event_body, remote_event_body, seed_event, TestApp};
use serde_json::json;

#[tokio::test]
async fn admin_creates_then_updates_event() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let created = app
        .post("/events", Some(&admin), event_body("Food Drive", &["Teamwork"], "High"))
        .await;
    assert_eq!(created.status, 201);
    assert_eq!(created.body["event"]["location"], "Houston, TX");
    assert_eq!(created.body["event"]["dateTime"], "2030-06-15T10:00:00");

    let updated = app
        .post("/events", Some(&admin), event_body("Food Drive", &["Cooking"], "Low"))
        .await;
    assert_eq!(updated.status, 200);

    let fetched = app.get("/events/Food%20Drive", Some(&admin)).await;
    assert_eq!(fetched.status, 200);
    assert_eq!(fetched.body["requiredSkills"], json!(["Cooking"]));
    assert_eq!(fetched.body["urgency"], "Low");

    // The update response matches what a later read returns
    assert_eq!(updated.body["event"], fetched.body);
    assert_eq!(updated.body["event"]["createdAt"], created.body["event"]["createdAt"]);
}

#[tokio::test]
async fn remote_event_has_remote_location() {
    let app = TestApp::new();
    seed_event(&app, remote_event_body("Online Tutoring", &[], "Medium")).await;

    let token = app.volunteer_token("ava@example.edu");
    let event = app.get("/events/Online%20Tutoring", Some(&token)).await;
    assert_eq!(event.body["location"], "remote");
}

#[tokio::test]
async fn event_validation_collects_every_field() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let response = app
        .post(
            "/events",
            Some(&admin),
            json!({
                "eventName": "",
                "eventDescription": "",
                "requiredSkills": "Teamwork",
                "urgency": "Extreme",
                "eventDate": "not-a-date",
                "eventTime": "25:99",
            }),
        )
        .await;

    assert_eq!(response.status, 400);
    let fields = error_fields(&response.body);
    for field in [
        "eventName",
        "eventDescription",
        "state",
        "city",
        "requiredSkills",
        "urgency",
        "eventDate",
        "eventTime",
    ] {
        assert!(fields.contains(&field.to_string()), "missing error for {}", field);
    }
}

#[tokio::test]
async fn past_event_is_rejected() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let mut body = event_body("Old Drive", &[], "Low");
    body["eventDate"] = json!("2001-01-01");

    let response = app.post("/events", Some(&admin), body).await;
    assert_eq!(response.status, 400);
    assert_eq!(
        response.body["errors"][0]["msg"],
        "Event date and time cannot be in the past."
    );
}

#[tokio::test]
async fn only_admins_manage_events() {
    let app = TestApp::new();
    let volunteer = app.volunteer_token("ava@example.edu");

    let body = event_body("Food Drive", &[], "High");
    assert_eq!(app.post("/events", None, body.clone()).await.status, 401);
    assert_eq!(app.post("/events", Some(&volunteer), body).await.status, 403);
    assert_eq!(app.get("/events", None).await.status, 401);
}

#[tokio::test]
async fn delete_event_and_missing_event() {
    let app = TestApp::new();
    let admin = app.admin_token();
    seed_event(&app, event_body("Food Drive", &[], "High")).await;

    let listed = app.get("/events", Some(&admin)).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    assert_eq!(app.delete("/events/Food%20Drive", Some(&admin)).await.status, 200);

    let missing = app.get("/events/Food%20Drive", Some(&admin)).await;
    assert_eq!(missing.status, 404);
    assert_eq!(missing.body["message"], "Event not found");

    assert_eq!(app.delete("/events/Food%20Drive", Some(&admin)).await.status, 404);
}
