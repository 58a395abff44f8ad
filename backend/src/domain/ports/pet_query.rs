//! Driving port for pet lookups and search.

use async_trait::async_trait;

use crate::domain::{Error, Pet, PetDetails, PetId};

/// Search request as supplied by an inbound adapter.
///
/// The optional characteristic filters arrive as raw wire tokens; the
/// use-case validates them against their literal sets before querying.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPetsRequest {
    pub city: String,
    pub age: Option<String>,
    pub size: Option<String>,
    pub energy_level: Option<String>,
    pub independence: Option<String>,
    pub environment: Option<String>,
}

/// Domain use-case port for pet reads.
#[async_trait]
pub trait PetQuery: Send + Sync {
    /// Fetch one pet with its owning organization attached.
    ///
    /// Fails with `NotFound` when no pet has the given id.
    async fn pet_details(&self, id: &PetId) -> Result<PetDetails, Error>;

    /// Search pets by city and optional characteristics.
    ///
    /// An empty or whitespace-only city fails with `InvalidRequest`; a
    /// city matching zero pets returns an empty list, not an error. All
    /// supplied filters narrow the result conjunctively.
    async fn search_pets(&self, request: SearchPetsRequest) -> Result<Vec<Pet>, Error>;
}
