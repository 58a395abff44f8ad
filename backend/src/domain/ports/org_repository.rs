//! Port abstraction for organization persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewOrg, Org, OrgId};

/// Persistence errors raised by organization repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrgPersistenceError {
    /// Repository connection could not be established.
    #[error("organization repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("organization repository query failed: {message}")]
    Query { message: String },
    /// A uniqueness constraint on the email column rejected the write.
    ///
    /// This is the authoritative guard against two concurrent
    /// registrations passing the use-case's existence pre-check.
    #[error("organization email already registered: {email}")]
    DuplicateEmail { email: String },
}

impl OrgPersistenceError {
    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-violation conflicts on the email column.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// Storage contract for organizations.
///
/// Two interchangeable implementations exist: a Diesel/PostgreSQL adapter
/// for durable storage and an in-memory adapter for isolated tests. Both
/// must produce identical observable behaviour for every operation.
#[async_trait]
pub trait OrgRepository: Send + Sync {
    /// Persist a new organization, assigning a fresh identifier and
    /// creation timestamp.
    async fn create(&self, new_org: NewOrg) -> Result<Org, OrgPersistenceError>;

    /// Fetch an organization by identifier.
    async fn find_by_id(&self, id: &OrgId) -> Result<Option<Org>, OrgPersistenceError>;

    /// Fetch an organization by email (case-insensitive equality).
    async fn find_by_email(&self, email: &str) -> Result<Option<Org>, OrgPersistenceError>;

    /// List organizations whose city contains the given fragment
    /// (case-insensitive substring match).
    async fn find_many_by_city(&self, city: &str) -> Result<Vec<Org>, OrgPersistenceError>;
}
