//! Port abstraction for pet persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{
    AgeGroup, EnergyLevel, Environment, Independence, NewPet, OrgId, Pet, PetDetails, PetId,
    PetSize,
};

/// Persistence errors raised by pet repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PetPersistenceError {
    /// Repository connection could not be established.
    #[error("pet repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("pet repository query failed: {message}")]
    Query { message: String },
}

impl PetPersistenceError {
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
}

/// Typed search predicate for pet listings.
///
/// `city` is mandatory and matches the owning organization's city as a
/// case-insensitive substring. Every other field, when present, is an
/// exact-match predicate; the predicates are ANDed together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PetSearchFilter {
    pub city: String,
    pub age: Option<AgeGroup>,
    pub size: Option<PetSize>,
    pub energy_level: Option<EnergyLevel>,
    pub independence: Option<Independence>,
    pub environment: Option<Environment>,
}

impl PetSearchFilter {
    /// Filter with only the mandatory city predicate set.
    pub fn for_city(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Self::default()
        }
    }
}

/// Storage contract for pets.
///
/// As with [`crate::domain::ports::OrgRepository`], the Diesel and
/// in-memory implementations must be observably identical.
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Persist a new pet owned by the given organization, assigning a
    /// fresh identifier and creation timestamp.
    async fn create(&self, new_pet: NewPet, org_id: &OrgId) -> Result<Pet, PetPersistenceError>;

    /// Fetch a pet by identifier, eagerly joining the owning
    /// organization.
    async fn find_by_id(&self, id: &PetId) -> Result<Option<PetDetails>, PetPersistenceError>;

    /// List pets matching the filter. Zero matches yield an empty list.
    async fn find_many_by_filter(
        &self,
        filter: &PetSearchFilter,
    ) -> Result<Vec<Pet>, PetPersistenceError>;
}
