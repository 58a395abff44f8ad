//! Driving port for the organization registration use-case.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it
//! to register an organization without knowing (or importing) the backing
//! infrastructure, which keeps HTTP handler tests deterministic.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::{Error, Org};

/// Full registration profile, including the plaintext password.
///
/// The password is held in a [`Zeroizing`] buffer and only leaves this
/// struct as a one-way digest. Schema-level validation (email format,
/// password length, coordinate ranges) happens upstream; the use-case
/// re-validates the business invariants.
#[derive(Debug, Clone)]
pub struct RegisterOrgRequest {
    pub name: String,
    pub author_name: String,
    pub email: String,
    pub whatsapp: String,
    pub password: Zeroizing<String>,
    pub cep: String,
    pub state: String,
    pub city: String,
    pub neighborhood: String,
    pub street: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Domain use-case port for organization registration.
#[async_trait]
pub trait OrgRegistration: Send + Sync {
    /// Register a new organization.
    ///
    /// Fails with a `Conflict` error when the email is already taken and
    /// with `InvalidRequest` when a required profile field is empty. The
    /// returned [`Org`] carries the password digest for internal use
    /// only; inbound adapters never serialize it outward.
    async fn register(&self, request: RegisterOrgRequest) -> Result<Org, Error>;
}
