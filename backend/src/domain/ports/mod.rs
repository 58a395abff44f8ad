//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`OrgRepository`, `PetRepository`, `PasswordHasher`,
//! `PhotoStore`) describe how the domain expects to interact with storage
//! and other infrastructure; driving ports (`OrgRegistration`,
//! `LoginService`, `PetCommand`, `PetQuery`) are what inbound adapters
//! call. Each driven port exposes strongly typed errors so adapters map
//! their failures into predictable variants instead of returning
//! `anyhow::Result`.

pub mod login_service;
pub mod org_registration;
pub mod org_repository;
pub mod password_hasher;
pub mod pet_command;
pub mod pet_query;
pub mod pet_repository;
pub mod photo_store;

pub use self::login_service::LoginService;
pub use self::org_registration::{OrgRegistration, RegisterOrgRequest};
pub use self::org_repository::{OrgPersistenceError, OrgRepository};
pub use self::password_hasher::{CredentialError, PasswordHasher};
pub use self::pet_command::{CreatePetRequest, PetCommand};
pub use self::pet_query::{PetQuery, SearchPetsRequest};
pub use self::pet_repository::{PetPersistenceError, PetRepository, PetSearchFilter};
pub use self::photo_store::{PhotoStore, PhotoStoreError, StoredPhoto, ALLOWED_PHOTO_MEDIA_TYPES};
