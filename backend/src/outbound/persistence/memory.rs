//! In-memory repository adapters.
//!
//! Non-durable substitutes for the Diesel adapters, used by isolated
//! tests and by the server when no database is configured. State lives in
//! a mutex-guarded ordered list; the adapters are meant for the
//! single-threaded test runner and light development traffic, not for
//! concurrent production mutation.
//!
//! Observable behaviour must match the PostgreSQL adapters exactly:
//! duplicate-email detection mirrors the unique index, and the pet store
//! resolves city matches through the owning organization.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    OrgPersistenceError, OrgRepository, PetPersistenceError, PetRepository, PetSearchFilter,
};
use crate::domain::{NewOrg, NewPet, Org, OrgId, Pet, PetDetails, PetId};

/// In-memory implementation of the `OrgRepository` port.
#[derive(Debug, Default)]
pub struct InMemoryOrgRepository {
    items: Mutex<Vec<Org>>,
}

impl InMemoryOrgRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> Result<MutexGuard<'_, Vec<Org>>, OrgPersistenceError> {
        self.items
            .lock()
            .map_err(|_| OrgPersistenceError::query("organization store lock poisoned"))
    }
}

#[async_trait]
impl OrgRepository for InMemoryOrgRepository {
    async fn create(&self, new_org: NewOrg) -> Result<Org, OrgPersistenceError> {
        let mut items = self.items()?;

        // Same rule as the unique index on lower(email) in PostgreSQL.
        let normalized = new_org.email.to_lowercase();
        let duplicate = items
            .iter()
            .any(|org| org.email.to_lowercase() == normalized);
        if duplicate {
            return Err(OrgPersistenceError::duplicate_email(new_org.email));
        }

        let org = Org {
            id: OrgId::random(),
            name: new_org.name,
            author_name: new_org.author_name,
            email: new_org.email,
            whatsapp: new_org.whatsapp,
            password_hash: new_org.password_hash,
            cep: new_org.cep,
            state: new_org.state,
            city: new_org.city,
            neighborhood: new_org.neighborhood,
            street: new_org.street,
            latitude: new_org.latitude,
            longitude: new_org.longitude,
            created_at: Utc::now(),
        };
        items.push(org.clone());
        Ok(org)
    }

    async fn find_by_id(&self, id: &OrgId) -> Result<Option<Org>, OrgPersistenceError> {
        let items = self.items()?;
        Ok(items.iter().find(|org| org.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Org>, OrgPersistenceError> {
        let normalized = email.to_lowercase();
        let items = self.items()?;
        Ok(items
            .iter()
            .find(|org| org.email.to_lowercase() == normalized)
            .cloned())
    }

    async fn find_many_by_city(&self, city: &str) -> Result<Vec<Org>, OrgPersistenceError> {
        let fragment = city.to_lowercase();
        let items = self.items()?;
        Ok(items
            .iter()
            .filter(|org| org.city.to_lowercase().contains(&fragment))
            .cloned()
            .collect())
    }
}

/// In-memory implementation of the `PetRepository` port.
///
/// Holds a handle to the organization store so city matching and detail
/// joins resolve through the owning organization, exactly like the SQL
/// join in the Diesel adapter.
#[derive(Debug)]
pub struct InMemoryPetRepository {
    items: Mutex<Vec<Pet>>,
    orgs: Arc<InMemoryOrgRepository>,
}

impl InMemoryPetRepository {
    /// Create an empty store joined to the given organization store.
    pub fn new(orgs: Arc<InMemoryOrgRepository>) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            orgs,
        }
    }

    fn items(&self) -> Result<MutexGuard<'_, Vec<Pet>>, PetPersistenceError> {
        self.items
            .lock()
            .map_err(|_| PetPersistenceError::query("pet store lock poisoned"))
    }

    async fn owning_org(&self, org_id: &OrgId) -> Result<Option<Org>, PetPersistenceError> {
        self.orgs
            .find_by_id(org_id)
            .await
            .map_err(|err| PetPersistenceError::query(err.to_string()))
    }
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {
    async fn create(&self, new_pet: NewPet, org_id: &OrgId) -> Result<Pet, PetPersistenceError> {
        let pet = Pet {
            id: PetId::random(),
            name: new_pet.name,
            about: new_pet.about,
            age: new_pet.age,
            size: new_pet.size,
            energy_level: new_pet.energy_level,
            independence: new_pet.independence,
            environment: new_pet.environment,
            adoption_requirements: new_pet.adoption_requirements,
            photos: new_pet.photos,
            org_id: *org_id,
            created_at: Utc::now(),
        };
        self.items()?.push(pet.clone());
        Ok(pet)
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<PetDetails>, PetPersistenceError> {
        let pet = {
            let items = self.items()?;
            items.iter().find(|pet| pet.id == *id).cloned()
        };
        let Some(pet) = pet else {
            return Ok(None);
        };

        let org = self
            .owning_org(&pet.org_id)
            .await?
            .ok_or_else(|| PetPersistenceError::query("owning organization missing"))?;
        Ok(Some(PetDetails { pet, org }))
    }

    async fn find_many_by_filter(
        &self,
        filter: &PetSearchFilter,
    ) -> Result<Vec<Pet>, PetPersistenceError> {
        let fragment = filter.city.to_lowercase();
        let candidates: Vec<Pet> = {
            let items = self.items()?;
            items
                .iter()
                .filter(|pet| {
                    filter.age.is_none_or(|age| pet.age == age)
                        && filter.size.is_none_or(|size| pet.size == size)
                        && filter
                            .energy_level
                            .is_none_or(|level| pet.energy_level == level)
                        && filter
                            .independence
                            .is_none_or(|independence| pet.independence == independence)
                        && filter
                            .environment
                            .is_none_or(|environment| pet.environment == environment)
                })
                .cloned()
                .collect()
        };

        let mut matches = Vec::new();
        for pet in candidates {
            let in_city = self
                .owning_org(&pet.org_id)
                .await?
                .is_some_and(|org| org.city.to_lowercase().contains(&fragment));
            if in_city {
                matches.push(pet);
            }
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    //! Contract coverage shared with the Diesel adapters.
    use super::*;
    use crate::domain::pet::PetDraft;

    fn new_org(email: &str, city: &str) -> NewOrg {
        NewOrg {
            name: "Pet Paradise".to_owned(),
            author_name: "John Doe".to_owned(),
            email: email.to_owned(),
            whatsapp: "11999999999".to_owned(),
            password_hash: "$2b$04$not-a-real-digest".to_owned(),
            cep: "01234-567".to_owned(),
            state: "SP".to_owned(),
            city: city.to_owned(),
            neighborhood: "Centro".to_owned(),
            street: "Rua das Flores, 123".to_owned(),
            latitude: -23.550_52,
            longitude: -46.633_309,
        }
    }

    fn new_pet(name: &str) -> NewPet {
        NewPet::try_from_draft(PetDraft {
            name: name.to_owned(),
            about: None,
            age: "ADULTO".to_owned(),
            size: "MEDIO".to_owned(),
            energy_level: "03".to_owned(),
            independence: "MEDIO".to_owned(),
            environment: "CASA".to_owned(),
            adoption_requirements: vec!["needs a yard".to_owned()],
            photos: Vec::new(),
        })
        .expect("valid draft converts")
    }

    #[tokio::test]
    async fn create_assigns_identity_and_timestamp() {
        let repo = InMemoryOrgRepository::new();
        let first = repo
            .create(new_org("a@example.com", "São Paulo"))
            .await
            .expect("creation succeeds");
        let second = repo
            .create(new_org("b@example.com", "São Paulo"))
            .await
            .expect("creation succeeds");
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let repo = InMemoryOrgRepository::new();
        repo.create(new_org("shelter@example.com", "São Paulo"))
            .await
            .expect("creation succeeds");

        let err = repo
            .create(new_org("Shelter@Example.com", "Curitiba"))
            .await
            .expect_err("duplicate must be rejected");
        assert!(matches!(err, OrgPersistenceError::DuplicateEmail { .. }));
    }

    #[tokio::test]
    async fn city_listing_matches_substring_case_insensitively() {
        let repo = InMemoryOrgRepository::new();
        repo.create(new_org("a@example.com", "São Paulo"))
            .await
            .expect("creation succeeds");
        repo.create(new_org("b@example.com", "Curitiba"))
            .await
            .expect("creation succeeds");

        let matched = repo
            .find_many_by_city("são pau")
            .await
            .expect("listing succeeds");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().map(|org| org.city.as_str()), Some("São Paulo"));
    }

    #[tokio::test]
    async fn pet_details_join_the_owning_org() {
        let orgs = Arc::new(InMemoryOrgRepository::new());
        let pets = InMemoryPetRepository::new(Arc::clone(&orgs));
        let org = orgs
            .create(new_org("a@example.com", "São Paulo"))
            .await
            .expect("creation succeeds");

        let created = pets
            .create(new_pet("Buddy"), &org.id)
            .await
            .expect("creation succeeds");
        let details = pets
            .find_by_id(&created.id)
            .await
            .expect("lookup succeeds")
            .expect("pet exists");
        assert_eq!(details.org.id, org.id);
        assert_eq!(details.pet.id, created.id);
    }

    #[tokio::test]
    async fn city_filter_resolves_through_the_owning_org() {
        let orgs = Arc::new(InMemoryOrgRepository::new());
        let pets = InMemoryPetRepository::new(Arc::clone(&orgs));
        let sp = orgs
            .create(new_org("a@example.com", "São Paulo"))
            .await
            .expect("creation succeeds");
        let curitiba = orgs
            .create(new_org("b@example.com", "Curitiba"))
            .await
            .expect("creation succeeds");
        pets.create(new_pet("Alpha"), &sp.id)
            .await
            .expect("creation succeeds");
        pets.create(new_pet("Beta"), &curitiba.id)
            .await
            .expect("creation succeeds");

        let matched = pets
            .find_many_by_filter(&PetSearchFilter::for_city("curitiba"))
            .await
            .expect("filtering succeeds");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().map(|pet| pet.name.as_str()), Some("Beta"));
    }
}
