//! Persistence adapters for the repository ports.
//!
//! Two families live here: Diesel/PostgreSQL adapters for durable storage
//! and in-memory adapters used by isolated tests (and by the server when
//! no database is configured). Both must behave identically through the
//! repository ports.

pub mod diesel_org_repository;
pub mod diesel_pet_repository;
pub mod memory;
pub mod models;
pub mod pool;
pub mod schema;

pub use self::diesel_org_repository::DieselOrgRepository;
pub use self::diesel_pet_repository::DieselPetRepository;
pub use self::memory::{InMemoryOrgRepository, InMemoryPetRepository};
pub use self::pool::{DbPool, PoolConfig, PoolError};
