//! Domain primitives, ports, and use-case services.
//!
//! Purpose: define the strongly typed entities (organizations and pets),
//! the abstract ports the use-cases depend on, and the use-case services
//! themselves. Types are immutable after creation; invariants and
//! serialisation contracts (serde) are documented on each type.
//!
//! Inbound adapters call the driving ports (`OrgRegistration`,
//! `LoginService`, `PetCommand`, `PetQuery`); outbound adapters implement
//! the driven ports (`OrgRepository`, `PetRepository`, `PasswordHasher`,
//! `PhotoStore`).

pub mod error;
pub mod org;
pub mod org_account_service;
pub mod pet;
pub mod pet_catalog_service;
pub mod ports;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::org::{NewOrg, Org, OrgCredentials, OrgId, OrgValidationError};
pub use self::org_account_service::OrgAccountService;
pub use self::pet::{
    AgeGroup, EnergyLevel, Environment, Independence, NewPet, Pet, PetDetails, PetId, PetSize,
    PetValidationError,
};
pub use self::pet_catalog_service::PetCatalogService;
