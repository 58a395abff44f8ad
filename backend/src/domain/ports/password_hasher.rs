//! Port abstraction for one-way password hashing.
//!
//! Hashing and verification are the only places plaintext passwords exist
//! in memory; implementations must not log or retain them beyond the
//! call.

/// Errors raised by credential hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    /// Producing a digest failed.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
    /// Comparing a plaintext against a digest failed (for example, the
    /// stored digest is malformed).
    #[error("password verification failed: {message}")]
    Verify { message: String },
}

impl CredentialError {
    /// Helper for digest-production failures.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }

    /// Helper for verification failures.
    pub fn verify(message: impl Into<String>) -> Self {
        Self::Verify {
            message: message.into(),
        }
    }
}

/// One-way, salted, adaptive-cost password hashing.
///
/// The cost factor is fixed at adapter construction from configuration.
/// Calls are CPU-bound and synchronous; use-cases invoke them inline.
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted digest of the plaintext.
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError>;

    /// Check a plaintext against a stored digest.
    fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, CredentialError>;
}
