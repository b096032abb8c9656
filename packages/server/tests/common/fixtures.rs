//! Request bodies and seeded records shared across tests.

use serde_json::{json, Value};

use super::TestApp;

/// Event form for a far-future date in Houston
pub fn event_body(name: &str, skills: &[&str], urgency: &str) -> Value {
    json!({
        "eventName": name,
        "eventDescription": format!("{} for the community", name),
        "city": "Houston",
        "state": "TX",
        "requiredSkills": skills,
        "urgency": urgency,
        "eventDate": "2030-06-15",
        "eventTime": "10:00",
    })
}

pub fn remote_event_body(name: &str, skills: &[&str], urgency: &str) -> Value {
    json!({
        "eventName": name,
        "eventDescription": format!("{} from home", name),
        "remote": true,
        "requiredSkills": skills,
        "urgency": urgency,
        "eventDate": "2030-06-20",
        "eventTime": "18:30",
    })
}

pub fn profile_body(full_name: &str, skills: &[&str], availability: &[&str], preferences: &str) -> Value {
    json!({
        "fullName": full_name,
        "address1": "123 Main St",
        "city": "Houston",
        "state": "TX",
        "zipCode": "77001",
        "skills": skills,
        "preferences": preferences,
        "availability": availability,
    })
}

/// Create an event through the API as admin, asserting success
pub async fn seed_event(app: &TestApp, body: Value) {
    let token = app.admin_token();
    let response = app.post("/events", Some(&token), body).await;
    assert!(
        response.status.is_success(),
        "seeding event failed: {} {}",
        response.status,
        response.body
    );
}

/// Create a volunteer's profile through the API, asserting success
pub async fn seed_profile(app: &TestApp, email: &str, body: Value) {
    let token = app.volunteer_token(email);
    let response = app.post("/profile", Some(&token), body).await;
    assert!(
        response.status.is_success(),
        "seeding profile failed: {} {}",
        response.status,
        response.body
    );
}
