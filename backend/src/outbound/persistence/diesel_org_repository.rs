//! PostgreSQL-backed `OrgRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{OrgPersistenceError, OrgRepository};
use crate::domain::{NewOrg, Org, OrgId};

use super::models::{NewOrgRow, OrgRow};
use super::pool::{DbPool, PoolError};
use super::schema::orgs;

diesel::define_sql_function! {
    /// SQL `lower()`, used for case-insensitive email equality.
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Escape LIKE/ILIKE metacharacters so user input matches literally.
pub(super) fn escape_like(fragment: &str) -> String {
    fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Map pool errors to organization port errors.
fn map_pool_error(error: PoolError) -> OrgPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            OrgPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to organization port errors.
fn map_diesel_error(error: diesel::result::Error) -> OrgPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            OrgPersistenceError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            OrgPersistenceError::query("database error")
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            OrgPersistenceError::query("database error")
        }
    }
}

/// Diesel-backed implementation of the `OrgRepository` port.
#[derive(Clone)]
pub struct DieselOrgRepository {
    pool: DbPool,
}

impl DieselOrgRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrgRepository for DieselOrgRepository {
    async fn create(&self, new_org: NewOrg) -> Result<Org, OrgPersistenceError> {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let email = new_org.email.clone();
        let row = NewOrgRow::stamp(new_org, Uuid::new_v4(), Utc::now());

        let created: OrgRow = diesel::insert_into(orgs::table)
            .values(&row)
            .returning(OrgRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match err {
                // The unique index on lower(email) is the authoritative
                // duplicate guard; surface its violation distinctly.
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    OrgPersistenceError::duplicate_email(email.clone())
                }
                other => map_diesel_error(other),
            })?;

        Ok(created.into())
    }

    async fn find_by_id(&self, id: &OrgId) -> Result<Option<Org>, OrgPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<OrgRow> = orgs::table
            .filter(orgs::id.eq(id.as_uuid()))
            .select(OrgRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Org::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Org>, OrgPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<OrgRow> = orgs::table
            .filter(lower(orgs::email).eq(email.to_lowercase()))
            .select(OrgRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Org::from))
    }

    async fn find_many_by_city(&self, city: &str) -> Result<Vec<Org>, OrgPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<OrgRow> = orgs::table
            .filter(orgs::city.ilike(format!("%{}%", escape_like(city))))
            .select(OrgRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Org::from).collect())
    }
}
