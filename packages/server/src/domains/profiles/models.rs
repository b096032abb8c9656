use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::null_as_default;
use crate::common::validation::{is_zip_code, len_between, parse_date, ValidationErrors};
use crate::domains::events::input::string_array;

/// Volunteer profile, keyed by account email.
///
/// Fields other than `email` default when missing or `null`, so partially
/// filled profiles (and imported records) still load and score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerProfile {
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address1: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address2: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub zip_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferences: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub availability: Vec<NaiveDate>,
}

impl VolunteerProfile {
    /// Blank profile created on first visit
    pub fn empty(email: &str) -> Self {
        Self {
            email: email.to_string(),
            ..Default::default()
        }
    }
}

/// Profile form body for create and update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub skills: serde_json::Value,
    #[serde(default)]
    pub preferences: Option<String>,
    #[serde(default)]
    pub availability: serde_json::Value,
}

impl ProfileInput {
    /// Validates the form and builds the profile for `email`
    pub fn validate(&self, email: &str) -> Result<VolunteerProfile, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check(len_between(email, 1, 50), "email", "Email must not exceed 50 characters.");
        errors.check(
            len_between(&self.full_name, 1, 50),
            "fullName",
            "Full name must be between 1 and 50 characters.",
        );
        errors.check(
            len_between(&self.address1, 0, 100),
            "address1",
            "Address1 must not exceed 100 characters.",
        );
        let address2 = self.address2.clone().unwrap_or_default();
        errors.check(
            len_between(&address2, 0, 100),
            "address2",
            "Address2 must not exceed 100 characters.",
        );
        errors.check(
            len_between(&self.city, 0, 50),
            "city",
            "City must not exceed 50 characters.",
        );
        errors.check(
            len_between(&self.state, 2, 2),
            "state",
            "State must be exactly 2 characters.",
        );
        errors.check(is_zip_code(&self.zip_code), "zipCode", "Invalid ZIP code format.");

        let skills = string_array(&self.skills);
        errors.check(skills.is_some(), "skills", "Skills must be an array of strings.");

        let availability = string_array(&self.availability).and_then(|dates| {
            dates
                .iter()
                .map(|d| parse_date(d))
                .collect::<Option<Vec<NaiveDate>>>()
        });
        errors.check(
            availability.is_some(),
            "availability",
            "Availability must be an array of dates.",
        );

        errors.into_result()?;

        let mut availability = availability.unwrap_or_default();
        availability.sort();
        availability.dedup();

        Ok(VolunteerProfile {
            email: email.to_string(),
            full_name: self.full_name.trim().to_string(),
            address1: self.address1.trim().to_string(),
            address2: address2.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            zip_code: self.zip_code.clone(),
            skills: skills.unwrap_or_default(),
            preferences: self.preferences.clone().unwrap_or_default(),
            availability,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_input() -> ProfileInput {
        serde_json::from_value(json!({
            "email": "arenaud@uh.edu",
            "fullName": "Arianne Renaud",
            "address1": "12345 Main St",
            "address2": "Apt 4B",
            "city": "Houston",
            "state": "TX",
            "zipCode": "77001",
            "skills": ["Communication", "Leadership"],
            "preferences": "Remote work",
            "availability": ["2024-10-12", "2024-10-08", "2024-10-12"]
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_profile() {
        let profile = valid_input().validate("arenaud@uh.edu").unwrap();

        assert_eq!(profile.full_name, "Arianne Renaud");
        assert_eq!(profile.skills, vec!["Communication", "Leadership"]);
        assert_eq!(
            profile.availability,
            vec![
                NaiveDate::from_ymd_opt(2024, 10, 8).unwrap(),
                NaiveDate::from_ymd_opt(2024, 10, 12).unwrap(),
            ]
        );
    }

    #[test]
    fn test_invalid_profile() {
        let input: ProfileInput = serde_json::from_value(json!({
            "fullName": "",
            "state": "Texas",
            "zipCode": "ABC",
            "skills": "Communication",
            "availability": ["not-a-date"]
        }))
        .unwrap();

        let errors = input.validate("someone@uh.edu").unwrap_err();
        for field in ["fullName", "state", "zipCode", "skills", "availability"] {
            assert!(errors.has(field), "missing error for {}", field);
        }
    }

    #[test]
    fn test_optional_fields_default() {
        let mut input = valid_input();
        input.address2 = None;
        input.preferences = None;

        let profile = input.validate("arenaud@uh.edu").unwrap();
        assert_eq!(profile.address2, "");
        assert_eq!(profile.preferences, "");
    }

    #[test]
    fn test_profile_null_collections_deserializes() {
        let profile: VolunteerProfile = serde_json::from_str(
            r#"{"email":"a@b.co","fullName":null,"skills":null,"availability":null,"preferences":null}"#,
        )
        .unwrap();
        assert_eq!(profile.full_name, "");
        assert!(profile.skills.is_empty());
        assert!(profile.availability.is_empty());
        assert_eq!(profile.preferences, "");
    }

    #[test]
    fn test_profile_missing_collections_deserializes() {
        let profile: VolunteerProfile =
            serde_json::from_str(r#"{"email":"a@b.co","city":"Houston","state":"TX"}"#).unwrap();
        assert!(profile.skills.is_empty());
        assert!(profile.availability.is_empty());
        assert_eq!(profile.preferences, "");
    }
}
