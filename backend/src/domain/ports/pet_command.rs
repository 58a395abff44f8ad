//! Driving port for the pet creation use-case.

use async_trait::async_trait;

use crate::domain::pet::PetDraft;
use crate::domain::{Error, OrgId, Pet};

/// Creation request: the owning organization plus the raw attribute
/// draft supplied by the inbound adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePetRequest {
    pub org_id: OrgId,
    pub draft: PetDraft,
}

/// Domain use-case port for pet creation.
#[async_trait]
pub trait PetCommand: Send + Sync {
    /// Create a pet owned by an existing organization.
    ///
    /// Fails with `NotFound` when the organization does not exist and
    /// with `InvalidRequest` when any single creation invariant is
    /// violated; nothing is persisted on failure.
    async fn create_pet(&self, request: CreatePetRequest) -> Result<Pet, Error>;
}
