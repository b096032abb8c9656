//! Server dependencies (using traits for testability)
//!
//! This module provides the central dependency container used by route
//! handlers, domain actions and scheduled tasks. Stores are trait objects so
//! the same code runs against Postgres in production and memory in tests.

use std::collections::HashSet;
use std::sync::Arc;

use sqlx::PgPool;

use crate::domains::auth::{JwtService, Role};
use crate::kernel::memory_store::InMemoryStore;
use crate::kernel::postgres_store::PostgresStore;
use crate::kernel::traits::{
    BaseAccountStore, BaseAssignmentStore, BaseEventStore, BaseHealthCheck, BaseHistoryStore,
    BaseNotificationStore, BaseProfileStore,
};

/// Server dependencies accessible to handlers and tasks
#[derive(Clone)]
pub struct ServerDeps {
    pub accounts: Arc<dyn BaseAccountStore>,
    pub profiles: Arc<dyn BaseProfileStore>,
    pub events: Arc<dyn BaseEventStore>,
    pub history: Arc<dyn BaseHistoryStore>,
    pub assignments: Arc<dyn BaseAssignmentStore>,
    pub notifications: Arc<dyn BaseNotificationStore>,
    pub health: Arc<dyn BaseHealthCheck>,
    /// JWT service for token creation and verification
    pub jwt_service: Arc<JwtService>,
    /// Emails treated as admin regardless of stored role
    pub admin_emails: Arc<HashSet<String>>,
}

impl ServerDeps {
    /// Wire every store to one Postgres pool
    pub fn postgres(pool: PgPool, jwt_service: Arc<JwtService>, admin_emails: Vec<String>) -> Self {
        Self::from_store(Arc::new(PostgresStore::new(pool)), jwt_service, admin_emails)
    }

    /// Wire every store to a fresh in-memory store
    pub fn in_memory(jwt_service: Arc<JwtService>, admin_emails: Vec<String>) -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()), jwt_service, admin_emails)
    }

    fn from_store<S>(store: Arc<S>, jwt_service: Arc<JwtService>, admin_emails: Vec<String>) -> Self
    where
        S: BaseAccountStore
            + BaseProfileStore
            + BaseEventStore
            + BaseHistoryStore
            + BaseAssignmentStore
            + BaseNotificationStore
            + BaseHealthCheck
            + 'static,
    {
        Self {
            accounts: store.clone(),
            profiles: store.clone(),
            events: store.clone(),
            history: store.clone(),
            assignments: store.clone(),
            notifications: store.clone(),
            health: store,
            jwt_service,
            admin_emails: Arc::new(
                admin_emails
                    .into_iter()
                    .map(|e| e.trim().to_lowercase())
                    .filter(|e| !e.is_empty())
                    .collect(),
            ),
        }
    }

    /// Effective role: configured admin emails are promoted
    pub fn effective_role(&self, email: &str, stored: Role) -> Role {
        if self.admin_emails.contains(&email.to_lowercase()) {
            Role::Admin
        } else {
            stored
        }
    }
}
