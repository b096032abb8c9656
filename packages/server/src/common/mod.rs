// Common types and utilities shared across the application

pub mod errors;
pub mod json;
pub mod validation;

pub use errors::{ApiError, ApiResult};
pub use json::{null_as_default, JsonBody};
pub use validation::{normalize_email, FieldError, ValidationErrors};
