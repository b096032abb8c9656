//! Auth domain - accounts, password hashing and JWT tokens

pub mod actions;
pub mod jwt;
pub mod models;
pub mod password;

pub use actions::{login, register_account, RegisterOutcome, Session};
pub use jwt::{Claims, JwtService};
pub use models::{CredentialsInput, Role, UserCredential};
