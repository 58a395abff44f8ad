//! End-to-end coverage of the HTTP API over the in-memory backend.
//!
//! Exercises the same wiring the server uses when no database is
//! configured: register an organization, establish a session, create and
//! find pets, and upload photos.

use std::sync::Arc;

use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use serde_json::{Value, json};

use backend::domain::ports::{
    LoginService, OrgRegistration, PetCommand, PetQuery, PhotoStore,
};
use backend::domain::{OrgAccountService, PetCatalogService};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{orgs, pets, photos};
use backend::outbound::persistence::{InMemoryOrgRepository, InMemoryPetRepository};
use backend::outbound::security::BcryptPasswordHasher;
use backend::outbound::storage::FilesystemPhotoStore;

fn http_state(upload_root: &std::path::Path) -> HttpState {
    let org_repo = Arc::new(InMemoryOrgRepository::new());
    let pet_repo = Arc::new(InMemoryPetRepository::new(Arc::clone(&org_repo)));
    let hasher = Arc::new(BcryptPasswordHasher::fast_for_tests());
    let accounts = Arc::new(OrgAccountService::new(Arc::clone(&org_repo), hasher));
    let catalog = Arc::new(PetCatalogService::new(pet_repo, org_repo));
    let photo_store: Arc<dyn PhotoStore> =
        Arc::new(FilesystemPhotoStore::new(upload_root, "/uploads"));

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

fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_secure(false)
        .build();

    App::new().app_data(state).wrap(session).service(
        web::scope("/api/v1")
            .service(orgs::register)
            .service(orgs::login)
            .service(photos::upload)
            .service(pets::search)
            .service(pets::create)
            .service(pets::details),
    )
}

fn register_body(email: &str) -> Value {
    json!({
        "name": "Pet Paradise",
        "author_name": "John Doe",
        "email": email,
        "whatsapp": "11999999999",
        "password": "123456",
        "cep": "01234-567",
        "state": "SP",
        "city": "São Paulo",
        "neighborhood": "Centro",
        "street": "Rua das Flores, 123",
        "latitude": -23.55052,
        "longitude": -46.633309
    })
}

fn pet_body(name: &str) -> Value {
    json!({
        "name": name,
        "about": "A friendly dog",
        "age": "ADULTO",
        "size": "MEDIO",
        "energy_level": "03",
        "independence": "MEDIO",
        "environment": "QUINTAL_PEQUENO",
        "adoption_requirements": ["needs experience"]
    })
}

async fn register<S>(app: &S, email: &str) -> StatusCode
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/orgs")
            .set_json(register_body(email))
            .to_request(),
    )
    .await;
    response.status()
}

async fn login<S>(app: &S, email: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/sessions")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    response
        .response()
        .cookies()
        .next()
        .expect("login sets the session cookie")
        .into_owned()
}

#[actix_web::test]
async fn registering_twice_with_the_same_email_conflicts() {
    let uploads = tempfile::tempdir().expect("temp dir");
    let app = test::init_service(test_app(web::Data::new(http_state(uploads.path())))).await;

    assert_eq!(register(&app, "john@petparadise.com").await, StatusCode::CREATED);
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/orgs")
            .set_json(register_body("john@petparadise.com"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "conflict");
}

#[actix_web::test]
async fn login_failures_are_unauthorized_and_indistinguishable() {
    let uploads = tempfile::tempdir().expect("temp dir");
    let app = test::init_service(test_app(web::Data::new(http_state(uploads.path())))).await;
    assert_eq!(register(&app, "john@petparadise.com").await, StatusCode::CREATED);

    for (email, password) in [
        ("john@petparadise.com", "wrong-password"),
        ("nobody@petparadise.com", "123456"),
    ] {
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/sessions")
                .set_json(json!({ "email": email, "password": password }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["message"], "invalid credentials");
    }
}

#[actix_web::test]
async fn pet_creation_requires_a_session() {
    let uploads = tempfile::tempdir().expect("temp dir");
    let app = test::init_service(test_app(web::Data::new(http_state(uploads.path())))).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/pets")
            .set_json(pet_body("Buddy"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn register_create_details_and_search_round_trip() {
    let uploads = tempfile::tempdir().expect("temp dir");
    let app = test::init_service(test_app(web::Data::new(http_state(uploads.path())))).await;

    assert_eq!(register(&app, "john@petparadise.com").await, StatusCode::CREATED);
    let cookie = login(&app, "john@petparadise.com", "123456").await;

    // Create a pet under the authenticated organization.
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/pets")
            .cookie(cookie.clone())
            .set_json(pet_body("Buddy"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(response).await;
    let pet_id = created["pet"]["id"].as_str().expect("pet id").to_owned();

    // Details return every field intact, with the owning org attached.
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/pets/{pet_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let details: Value = test::read_body_json(response).await;
    assert_eq!(details["pet"]["name"], "Buddy");
    assert_eq!(details["pet"]["age"], "ADULTO");
    assert_eq!(details["pet"]["size"], "MEDIO");
    assert_eq!(details["pet"]["energy_level"], "03");
    assert_eq!(details["pet"]["independence"], "MEDIO");
    assert_eq!(details["pet"]["environment"], "QUINTAL_PEQUENO");
    assert_eq!(details["pet"]["adoption_requirements"][0], "needs experience");
    assert_eq!(details["pet"]["org"]["city"], "São Paulo");
    assert!(details["pet"]["org"].get("password_hash").is_none());

    // City search includes the pet; adding a non-matching size excludes it.
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/pets/search?city=S%C3%A3o%20Paulo")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let found: Value = test::read_body_json(response).await;
    assert_eq!(found["pets"].as_array().map(Vec::len), Some(1));
    assert_eq!(found["pets"][0]["id"].as_str(), Some(pet_id.as_str()));

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/pets/search?city=S%C3%A3o%20Paulo&size=GRANDE")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let excluded: Value = test::read_body_json(response).await;
    assert_eq!(excluded["pets"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn search_validates_city_and_tolerates_zero_matches() {
    let uploads = tempfile::tempdir().expect("temp dir");
    let app = test::init_service(test_app(web::Data::new(http_state(uploads.path())))).await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/pets/search?city=%20%20")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/pets/search?city=Curitiba")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["pets"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn malformed_pet_ids_are_rejected() {
    let uploads = tempfile::tempdir().expect("temp dir");
    let app = test::init_service(test_app(web::Data::new(http_state(uploads.path())))).await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/pets/not-a-uuid")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn invalid_pet_drafts_fail_before_persisting() {
    let uploads = tempfile::tempdir().expect("temp dir");
    let app = test::init_service(test_app(web::Data::new(http_state(uploads.path())))).await;
    assert_eq!(register(&app, "john@petparadise.com").await, StatusCode::CREATED);
    let cookie = login(&app, "john@petparadise.com", "123456").await;

    let mut invalid = pet_body("Buddy");
    invalid["age"] = json!("INVALID_AGE");
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/pets")
            .cookie(cookie)
            .set_json(invalid)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/pets/search?city=S%C3%A3o%20Paulo")
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["pets"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn photo_upload_is_gated_and_enforces_the_allow_list() {
    let uploads = tempfile::tempdir().expect("temp dir");
    let app = test::init_service(test_app(web::Data::new(http_state(uploads.path())))).await;

    // Unauthenticated uploads are rejected.
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/pets/photos")
            .insert_header(("content-type", "image/png"))
            .set_payload(&b"not-really-a-png"[..])
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(register(&app, "john@petparadise.com").await, StatusCode::CREATED);
    let cookie = login(&app, "john@petparadise.com", "123456").await;

    // Disallowed media types are a client error.
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/pets/photos")
            .cookie(cookie.clone())
            .insert_header(("content-type", "text/plain"))
            .set_payload(&b"definitely-not-an-image"[..])
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Allowed uploads land on disk and yield a stable URL.
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/pets/photos")
            .cookie(cookie)
            .insert_header(("content-type", "image/png"))
            .set_payload(&b"not-really-a-png"[..])
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(response).await;
    let url = body["photo"]["url"].as_str().expect("photo url");
    let filename = body["photo"]["filename"].as_str().expect("photo filename");
    assert!(url.starts_with("/uploads/pets/"));
    assert!(uploads.path().join("pets").join(filename).exists());
}
