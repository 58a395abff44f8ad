//! PostgreSQL-backed `PetRepository` implementation using Diesel.
//!
//! Detail lookups and city matching join the owning organization, so the
//! adapter mirrors the contract that a pet's city is its organization's
//! city.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{PetPersistenceError, PetRepository, PetSearchFilter};
use crate::domain::{NewPet, Org, OrgId, Pet, PetDetails, PetId};

use super::diesel_org_repository::escape_like;
use super::models::{NewPetRow, OrgRow, PetRow};
use super::pool::{DbPool, PoolError};
use super::schema::{orgs, pets};

/// Map pool errors to pet port errors.
fn map_pool_error(error: PoolError) -> PetPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PetPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to pet port errors.
fn map_diesel_error(error: diesel::result::Error) -> PetPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            PetPersistenceError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            PetPersistenceError::query("database error")
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            PetPersistenceError::query("database error")
        }
    }
}

/// Diesel-backed implementation of the `PetRepository` port.
#[derive(Clone)]
pub struct DieselPetRepository {
    pool: DbPool,
}

impl DieselPetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetRepository for DieselPetRepository {
    async fn create(&self, new_pet: NewPet, org_id: &OrgId) -> Result<Pet, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPetRow::stamp(new_pet, org_id, Uuid::new_v4(), Utc::now());

        let created: PetRow = diesel::insert_into(pets::table)
            .values(&row)
            .returning(PetRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        created.try_into()
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<PetDetails>, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let joined: Option<(PetRow, OrgRow)> = pets::table
            .inner_join(orgs::table)
            .filter(pets::id.eq(id.as_uuid()))
            .select((PetRow::as_select(), OrgRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        joined
            .map(|(pet_row, org_row)| {
                Ok(PetDetails {
                    pet: pet_row.try_into()?,
                    org: Org::from(org_row),
                })
            })
            .transpose()
    }

    async fn find_many_by_filter(
        &self,
        filter: &PetSearchFilter,
    ) -> Result<Vec<Pet>, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = pets::table
            .inner_join(orgs::table)
            .filter(orgs::city.ilike(format!("%{}%", escape_like(&filter.city))))
            .select(PetRow::as_select())
            .into_boxed();

        if let Some(age) = filter.age {
            query = query.filter(pets::age.eq(age.as_str()));
        }
        if let Some(size) = filter.size {
            query = query.filter(pets::size.eq(size.as_str()));
        }
        if let Some(energy_level) = filter.energy_level {
            query = query.filter(pets::energy_level.eq(energy_level.as_str()));
        }
        if let Some(independence) = filter.independence {
            query = query.filter(pets::independence.eq(independence.as_str()));
        }
        if let Some(environment) = filter.environment {
            query = query.filter(pets::environment.eq(environment.as_str()));
        }

        let rows: Vec<PetRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;

        rows.into_iter().map(Pet::try_from).collect()
    }
}
