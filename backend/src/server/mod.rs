//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_files::Files;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::SameSite;
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::domain::ports::{
    LoginService, OrgRegistration, PetCommand, PetQuery, PhotoStore,
};
use backend::domain::{OrgAccountService, PetCatalogService};
use backend::inbound::http::health::{self, HealthState};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{orgs, pets, photos};
use backend::outbound::persistence::{
    DieselOrgRepository, DieselPetRepository, InMemoryOrgRepository, InMemoryPetRepository,
};
use backend::outbound::security::BcryptPasswordHasher;
use backend::outbound::storage::FilesystemPhotoStore;

/// Upload payload cap: 5 MiB, matching the public API contract.
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Build the handler dependency bundle from configuration.
///
/// Uses the Diesel-backed repositories when a pool is configured and the
/// in-memory substitutes otherwise, so the server stays usable for local
/// development without PostgreSQL.
fn build_http_state(config: &ServerConfig) -> HttpState {
    let hasher = Arc::new(BcryptPasswordHasher::new(config.bcrypt_cost));
    let photo_store: Arc<dyn PhotoStore> = Arc::new(FilesystemPhotoStore::new(
        config.upload_dir.clone(),
        "/uploads",
    ));

    match &config.db_pool {
        Some(pool) => {
            let org_repo = Arc::new(DieselOrgRepository::new(pool.clone()));
            let pet_repo = Arc::new(DieselPetRepository::new(pool.clone()));
            let accounts = Arc::new(OrgAccountService::new(Arc::clone(&org_repo), hasher));
            let catalog = Arc::new(PetCatalogService::new(pet_repo, org_repo));
            let registration: Arc<dyn OrgRegistration> = accounts.clone();
            let login: Arc<dyn LoginService> = accounts;
            let pet_command: Arc<dyn PetCommand> = catalog.clone();
            let pet_query: Arc<dyn PetQuery> = catalog;
            HttpState {
                registration,
                login,
                pet_command,
                pet_query,
                photos: photo_store,
            }
        }
        None => {
            let org_repo = Arc::new(InMemoryOrgRepository::new());
            let pet_repo = Arc::new(InMemoryPetRepository::new(Arc::clone(&org_repo)));
            let accounts = Arc::new(OrgAccountService::new(Arc::clone(&org_repo), hasher));
            let catalog = Arc::new(PetCatalogService::new(pet_repo, org_repo));
            let registration: Arc<dyn OrgRegistration> = accounts.clone();
            let login: Arc<dyn LoginService> = accounts;
            let pet_command: Arc<dyn PetCommand> = catalog.clone();
            let pet_query: Arc<dyn PetQuery> = catalog;
            HttpState {
                registration,
                login,
                pet_command,
                pet_query,
                photos: photo_store,
            }
        }
    }
}

/// Run the HTTP server until shutdown.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    // The static-file service refuses to start on a missing directory.
    std::fs::create_dir_all(&config.upload_dir)?;

    let state = web::Data::new(build_http_state(&config));
    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays
    // reachable from this scope.
    let server_health_state = health_state.clone();

    let key = config.session_key.clone();
    let cookie_secure = config.cookie_secure;
    let upload_dir = config.upload_dir.clone();

    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        let app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
            .wrap(session)
            .service(health::live)
            .service(health::ready)
            .service(
                web::scope("/api/v1")
                    .service(orgs::register)
                    .service(orgs::login)
                    .service(photos::upload)
                    // `search` before `{pet_id}` so the literal segment
                    // wins the route match.
                    .service(pets::search)
                    .service(pets::create)
                    .service(pets::details),
            )
            .service(Files::new("/uploads", upload_dir.clone()));

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );

        app
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
