//! Field validation helpers.
//!
//! Validators collect every failing field instead of stopping at the first one,
//! and serialize as `{"errors": [{"field": ..., "msg": ...}]}`.

use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap();
    static ref ZIP_RE: Regex = Regex::new(r"^\d{5}(-\d{4})?$").unwrap();
    static ref TIME_RE: Regex = Regex::new(r"^([01]\d|2[0-3]):?([0-5]\d)$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub msg: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `msg` against `field` unless `ok` holds
    pub fn check(&mut self, ok: bool, field: &str, msg: &str) {
        if !ok {
            self.add(field, msg);
        }
    }

    pub fn add(&mut self, field: &str, msg: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            msg: msg.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Canonical form of an email address; accounts and ownership checks use it
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn is_email(value: &str) -> bool {
    value.len() <= 254 && EMAIL_RE.is_match(value)
}

/// US postal code: `12345` or `12345-6789`
pub fn is_zip_code(value: &str) -> bool {
    ZIP_RE.is_match(value)
}

/// Character count within `min..=max`
pub fn len_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

/// Parses an ISO-8601 calendar date, accepting a trailing time component
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Parses `HH:mm` (colon optional)
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let caps = TIME_RE.captures(value)?;
    let hour = caps.get(1)?.as_str().parse().ok()?;
    let minute = caps.get(2)?.as_str().parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}
