//! bcrypt-backed `PasswordHasher` adapter.
//!
//! bcrypt salts every digest and its cost factor is adaptive: the work
//! doubles per increment. The cost is fixed at construction from
//! configuration. Plaintext only exists in the arguments of the two port
//! methods and is never logged.

use crate::domain::ports::{CredentialError, PasswordHasher};

/// Lowest cost factor bcrypt accepts.
const MIN_COST: u32 = 4;
/// Highest cost factor bcrypt accepts.
const MAX_COST: u32 = 31;

/// Credential hashing adapter over the `bcrypt` crate.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given cost factor, clamped to bcrypt's
    /// supported range.
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    /// Hasher at the minimum supported cost.
    ///
    /// Only suitable for tests: a minimum-cost digest is far too cheap to
    /// brute-force-resist, but keeps test suites fast.
    pub fn fast_for_tests() -> Self {
        Self::new(MIN_COST)
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        bcrypt::hash(plaintext, self.cost).map_err(|err| CredentialError::hash(err.to_string()))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, CredentialError> {
        bcrypt::verify(plaintext, digest).map_err(|err| CredentialError::verify(err.to_string()))
    }
}
