//! Backend library modules.
//!
//! The crate follows a hexagonal layout: `domain` holds the entities,
//! ports, and use-case services; `inbound` adapts HTTP traffic onto the
//! driving ports; `outbound` implements the driven ports against
//! PostgreSQL, bcrypt, and the local filesystem.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
