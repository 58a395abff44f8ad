//! Pet catalog use-cases: creation, detail lookup, and search.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    CreatePetRequest, OrgPersistenceError, OrgRepository, PetCommand, PetPersistenceError,
    PetQuery, PetRepository, PetSearchFilter, SearchPetsRequest,
};
use crate::domain::{Error, NewPet, Pet, PetDetails, PetId};

/// Service implementing [`PetCommand`] and [`PetQuery`].
#[derive(Clone)]
pub struct PetCatalogService<P, O> {
    pets: Arc<P>,
    orgs: Arc<O>,
}

impl<P, O> PetCatalogService<P, O> {
    /// Create a new service with the given repositories.
    pub fn new(pets: Arc<P>, orgs: Arc<O>) -> Self {
        Self { pets, orgs }
    }
}

fn map_org_persistence_error(error: OrgPersistenceError) -> Error {
    match error {
        OrgPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("organization repository unavailable: {message}"))
        }
        // A duplicate-email conflict cannot arise from a read; treat it as
        // any other unexpected query failure.
        OrgPersistenceError::Query { .. } | OrgPersistenceError::DuplicateEmail { .. } => {
            Error::internal(format!("organization repository error: {error}"))
        }
    }
}

fn map_pet_persistence_error(error: PetPersistenceError) -> Error {
    match error {
        PetPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("pet repository unavailable: {message}"))
        }
        PetPersistenceError::Query { message } => {
            Error::internal(format!("pet repository error: {message}"))
        }
    }
}

fn build_filter(request: SearchPetsRequest) -> Result<PetSearchFilter, Error> {
    if request.city.trim().is_empty() {
        return Err(Error::invalid_request("city is required to search pets"));
    }

    let mut filter = PetSearchFilter::for_city(request.city);
    if let Some(raw) = request.age {
        filter.age = Some(raw.parse().map_err(invalid_token)?);
    }
    if let Some(raw) = request.size {
        filter.size = Some(raw.parse().map_err(invalid_token)?);
    }
    if let Some(raw) = request.energy_level {
        filter.energy_level = Some(raw.parse().map_err(invalid_token)?);
    }
    if let Some(raw) = request.independence {
        filter.independence = Some(raw.parse().map_err(invalid_token)?);
    }
    if let Some(raw) = request.environment {
        filter.environment = Some(raw.parse().map_err(invalid_token)?);
    }
    Ok(filter)
}

fn invalid_token(error: crate::domain::PetValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

#[async_trait]
impl<P, O> PetCommand for PetCatalogService<P, O>
where
    P: PetRepository,
    O: OrgRepository,
{
    async fn create_pet(&self, request: CreatePetRequest) -> Result<Pet, Error> {
        let org = self
            .orgs
            .find_by_id(&request.org_id)
            .await
            .map_err(map_org_persistence_error)?
            .ok_or_else(|| Error::not_found("organization not found"))?;

        let new_pet = NewPet::try_from_draft(request.draft).map_err(invalid_token)?;

        let pet = self
            .pets
            .create(new_pet, &org.id)
            .await
            .map_err(map_pet_persistence_error)?;

        debug!(pet_id = %pet.id, org_id = %org.id, "pet created");
        Ok(pet)
    }
}

#[async_trait]
impl<P, O> PetQuery for PetCatalogService<P, O>
where
    P: PetRepository,
    O: OrgRepository,
{
    async fn pet_details(&self, id: &PetId) -> Result<PetDetails, Error> {
        self.pets
            .find_by_id(id)
            .await
            .map_err(map_pet_persistence_error)?
            .ok_or_else(|| Error::not_found("pet not found"))
    }

    async fn search_pets(&self, request: SearchPetsRequest) -> Result<Vec<Pet>, Error> {
        let filter = build_filter(request)?;
        self.pets
            .find_many_by_filter(&filter)
            .await
            .map_err(map_pet_persistence_error)
    }
}
