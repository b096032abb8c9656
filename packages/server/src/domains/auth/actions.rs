//! Account registration and login

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info};

use super::models::{Role, UserCredential};
use super::password::{hash_password, verify_password};
use crate::common::normalize_email;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    AlreadyExists,
}

/// Issued on successful login
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub email: String,
    pub role: Role,
}

/// Register a new account with a hashed password.
///
/// Emails are stored lowercased, so addresses differing only in case collide.
pub async fn register_account(
    email: &str,
    password: &str,
    role: Role,
    deps: &ServerDeps,
) -> Result<RegisterOutcome> {
    let email = normalize_email(email);
    let account = UserCredential {
        email: email.clone(),
        password_hash: hash_password(password)?,
        role,
        created_at: Utc::now(),
    };

    if !deps.accounts.insert_account(&account).await? {
        debug!(email = %email, "Registration rejected: account exists");
        return Ok(RegisterOutcome::AlreadyExists);
    }

    info!(email = %email, role = role.as_str(), "Account registered");
    Ok(RegisterOutcome::Registered)
}

/// Check credentials and issue a token.
///
/// Returns `None` for an unknown email or wrong password; callers must not
/// reveal which one failed.
pub async fn login(email: &str, password: &str, deps: &ServerDeps) -> Result<Option<Session>> {
    let email = normalize_email(email);
    let Some(account) = deps.accounts.find_account(&email).await? else {
        debug!(email = %email, "Login failed: unknown account");
        return Ok(None);
    };

    if !verify_password(password, &account.password_hash) {
        debug!(email = %email, "Login failed: wrong password");
        return Ok(None);
    }

    let role = deps.effective_role(&account.email, account.role);
    let token = deps
        .jwt_service
        .create_token(&account.email, role)
        .context("Failed to sign token")?;

    info!(email = %email, "Login successful");
    Ok(Some(Session {
        token,
        email: account.email,
        role,
    }))
}
