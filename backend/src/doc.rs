//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API: every HTTP endpoint from the inbound
//! layer plus the session cookie security scheme. The generated document
//! backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/sessions.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Pet adoption backend API",
        description = "HTTP interface for organization accounts, adoptable pets, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::orgs::register,
        crate::inbound::http::orgs::login,
        crate::inbound::http::pets::create,
        crate::inbound::http::pets::search,
        crate::inbound::http::pets::details,
        crate::inbound::http::photos::upload,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::inbound::http::orgs::RegisterOrgBody,
        crate::inbound::http::orgs::LoginBody,
        crate::inbound::http::pets::CreatePetBody,
        crate::inbound::http::pets::PetDto,
        crate::inbound::http::pets::OrgProfileDto,
        crate::inbound::http::pets::PetDetailsDto,
        crate::inbound::http::pets::PetEnvelope,
        crate::inbound::http::pets::PetDetailsEnvelope,
        crate::inbound::http::pets::PetsEnvelope,
        crate::inbound::http::photos::PhotoDto,
        crate::inbound::http::photos::PhotoEnvelope,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/v1/orgs",
            "/api/v1/sessions",
            "/api/v1/pets",
            "/api/v1/pets/search",
            "/api/v1/pets/{pet_id}",
            "/api/v1/pets/photos",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                paths.iter().any(|path| *path == expected),
                "missing path {expected}"
            );
        }
    }

    #[test]
    fn document_registers_the_session_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components are generated");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
