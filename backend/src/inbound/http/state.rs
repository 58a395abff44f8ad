//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they
//! only depend on domain ports (use-cases) and remain testable without
//! I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, OrgRegistration, PetCommand, PetQuery, PhotoStore};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn OrgRegistration>,
    pub login: Arc<dyn LoginService>,
    pub pet_command: Arc<dyn PetCommand>,
    pub pet_query: Arc<dyn PetQuery>,
    pub photos: Arc<dyn PhotoStore>,
}
