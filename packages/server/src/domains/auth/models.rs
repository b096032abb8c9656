use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::validation::{is_email, normalize_email, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Volunteer,
    Admin,
}

impl Role {
    pub fn parse(label: &str) -> Self {
        if label.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::Volunteer
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Volunteer => "volunteer",
            Self::Admin => "admin",
        }
    }
}

/// Login account
#[derive(Debug, Clone, PartialEq)]
pub struct UserCredential {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Body for signup, admin registration and login
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl CredentialsInput {
    /// Email in canonical form, as stored and put in tokens
    pub fn email(&self) -> String {
        normalize_email(&self.email)
    }

    pub fn validate_registration(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(is_email(&self.email()), "email", "Please include a valid email");
        errors.check(
            self.password.chars().count() >= 6,
            "password",
            "Password must be 6 or more characters",
        );
        errors.into_result()
    }

    pub fn validate_login(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(is_email(&self.email()), "email", "Please include a valid email");
        errors.check(!self.password.is_empty(), "password", "Password is required");
        errors.into_result()
    }
}
