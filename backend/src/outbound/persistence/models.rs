//! Row types mapping between the PostgreSQL schema and domain entities.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{NewOrg, NewPet, Org, OrgId, Pet, PetId};
use crate::domain::ports::PetPersistenceError;

use super::schema::{orgs, pets};

/// Organization row as selected from the database.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orgs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrgRow {
    pub id: Uuid,
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

impl From<OrgRow> for Org {
    fn from(row: OrgRow) -> Self {
        Self {
            id: OrgId::from_uuid(row.id),
            name: row.name,
            author_name: row.author_name,
            email: row.email,
            whatsapp: row.whatsapp,
            password_hash: row.password_hash,
            cep: row.cep,
            state: row.state,
            city: row.city,
            neighborhood: row.neighborhood,
            street: row.street,
            latitude: row.latitude,
            longitude: row.longitude,
            created_at: row.created_at,
        }
    }
}

/// Organization row ready for insertion.
///
/// The adapter assigns the identifier and creation timestamp before
/// inserting; PostgreSQL never generates them implicitly.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orgs)]
pub struct NewOrgRow {
    pub id: Uuid,
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

impl NewOrgRow {
    /// Stamp a validated attribute set with identity and creation time.
    pub fn stamp(new_org: NewOrg, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
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
            created_at,
        }
    }
}

/// Pet row as selected from the database.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PetRow {
    pub id: Uuid,
    pub name: String,
    pub about: Option<String>,
    pub age: String,
    pub size: String,
    pub energy_level: String,
    pub independence: String,
    pub environment: String,
    pub adoption_requirements: Vec<String>,
    pub photos: Vec<String>,
    pub org_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PetRow> for Pet {
    type Error = PetPersistenceError;

    /// Convert a row back into the domain entity.
    ///
    /// The characteristic columns are validated against their closed
    /// token sets; a row that fails to parse indicates data written
    /// outside the domain and surfaces as a query error.
    fn try_from(row: PetRow) -> Result<Self, Self::Error> {
        let corrupt =
            |err: &dyn std::fmt::Display| PetPersistenceError::query(format!("corrupt pet row: {err}"));

        Ok(Self {
            id: PetId::from_uuid(row.id),
            name: row.name,
            about: row.about,
            age: row.age.parse().map_err(|err| corrupt(&err))?,
            size: row.size.parse().map_err(|err| corrupt(&err))?,
            energy_level: row.energy_level.parse().map_err(|err| corrupt(&err))?,
            independence: row.independence.parse().map_err(|err| corrupt(&err))?,
            environment: row.environment.parse().map_err(|err| corrupt(&err))?,
            adoption_requirements: row.adoption_requirements,
            photos: row.photos,
            org_id: OrgId::from_uuid(row.org_id),
            created_at: row.created_at,
        })
    }
}

/// Pet row ready for insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pets)]
pub struct NewPetRow {
    pub id: Uuid,
    pub name: String,
    pub about: Option<String>,
    pub age: String,
    pub size: String,
    pub energy_level: String,
    pub independence: String,
    pub environment: String,
    pub adoption_requirements: Vec<String>,
    pub photos: Vec<String>,
    pub org_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl NewPetRow {
    /// Stamp a validated attribute set with identity, owner, and
    /// creation time.
    pub fn stamp(new_pet: NewPet, org_id: &OrgId, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new_pet.name,
            about: new_pet.about,
            age: new_pet.age.as_str().to_owned(),
            size: new_pet.size.as_str().to_owned(),
            energy_level: new_pet.energy_level.as_str().to_owned(),
            independence: new_pet.independence.as_str().to_owned(),
            environment: new_pet.environment.as_str().to_owned(),
            adoption_requirements: new_pet.adoption_requirements,
            photos: new_pet.photos,
            org_id: *org_id.as_uuid(),
            created_at,
        }
    }
}
