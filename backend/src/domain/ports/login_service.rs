//! Driving port for the organization authentication use-case.

use async_trait::async_trait;

use crate::domain::{Error, Org, OrgCredentials};

/// Domain use-case port for authentication.
///
/// Implementations return the same `Unauthorized` error for an unknown
/// email and for a wrong password so callers cannot tell which applied.
/// No token is issued here; session or token minting is the inbound
/// adapter's responsibility once authentication succeeds.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated organization.
    async fn authenticate(&self, credentials: &OrgCredentials) -> Result<Org, Error>;
}
