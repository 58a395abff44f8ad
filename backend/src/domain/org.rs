//! Organization data model.
//!
//! An organization is the account entity representing an adoption agency
//! or shelter. Records are immutable after creation: no update or delete
//! path exists in the domain.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Validation errors returned by organization value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgValidationError {
    /// Identifier was empty or not a valid UUID.
    InvalidId,
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for OrgValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "organization id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for OrgValidationError {}

/// Stable organization identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(Uuid);

impl OrgId {
    /// Validate and construct an [`OrgId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, OrgValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(OrgValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| OrgValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`OrgId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered organization.
///
/// ## Invariants
/// - `email` is unique across all organizations (case-insensitive).
/// - Address fields (`cep`, `state`, `city`, `neighborhood`, `street`) and
///   `whatsapp` are non-empty.
/// - `password_hash` holds a salted one-way digest, never plaintext, and
///   must not be serialized outward; inbound adapters expose only the
///   public profile fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Org {
    pub id: OrgId,
    pub name: String,
    pub author_name: String,
    pub email: String,
    pub whatsapp: String,
    pub password_hash: String,
    pub cep: String,
    pub state: String,
    pub city: String,
    pub neighborhood: String,
    pub street: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

/// Attribute set handed to [`crate::domain::ports::OrgRepository::create`].
///
/// The repository assigns the identifier and creation timestamp; every
/// field here has already passed the registration use-case's validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrg {
    pub name: String,
    pub author_name: String,
    pub email: String,
    pub whatsapp: String,
    pub password_hash: String,
    pub cep: String,
    pub state: String,
    pub city: String,
    pub neighborhood: String,
    pub street: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Validated login credentials used by the authentication use-case.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// The password is held in a [`Zeroizing`] buffer so the plaintext is
/// wiped when the credentials are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl OrgCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, OrgValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(OrgValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(OrgValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for organization lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", OrgValidationError::EmptyEmail)]
    #[case("   ", "pw", OrgValidationError::EmptyEmail)]
    #[case("org@example.com", "", OrgValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: OrgValidationError,
    ) {
        let err =
            OrgCredentials::try_from_parts(email, password).expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  org@example.com  ", "secret")]
    #[case("shelter@example.com", "correct horse battery staple")]
    fn valid_credentials_trim_email(#[case] email: &str, #[case] password: &str) {
        let creds =
            OrgCredentials::try_from_parts(email, password).expect("valid inputs should succeed");
        assert_eq!(creds.email(), email.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    #[case(" 123e4567-e89b-12d3-a456-426614174000")]
    fn rejects_malformed_ids(#[case] raw: &str) {
        assert_eq!(OrgId::new(raw), Err(OrgValidationError::InvalidId));
    }

    #[test]
    fn id_round_trips_through_display() {
        let id = OrgId::random();
        let parsed = OrgId::new(id.to_string()).expect("display output parses");
        assert_eq!(parsed, id);
    }
}
