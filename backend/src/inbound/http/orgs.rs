//! Organization API handlers.
//!
//! ```text
//! POST /api/v1/orgs {"name":"…","email":"…","password":"…",…}
//! POST /api/v1/sessions {"email":"…","password":"…"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use zeroize::Zeroizing;

use crate::domain::ports::RegisterOrgRequest;
use crate::domain::{Error, OrgCredentials, OrgValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Minimum accepted password length, matching the public API contract.
const PASSWORD_MIN_LEN: usize = 6;

/// Registration request body for `POST /api/v1/orgs`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterOrgBody {
    pub name: String,
    pub author_name: String,
    #[schema(example = "contact@shelter.org")]
    pub email: String,
    pub whatsapp: String,
    #[schema(example = "secret-password")]
    pub password: String,
    pub cep: String,
    pub state: String,
    pub city: String,
    pub neighborhood: String,
    pub street: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Schema-level failures when converting the registration body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterBodyError {
    /// Email missing an `@` or blank.
    InvalidEmail,
    /// Password shorter than [`PASSWORD_MIN_LEN`].
    PasswordTooShort,
    /// Latitude outside [-90, 90].
    LatitudeOutOfRange,
    /// Longitude outside [-180, 180].
    LongitudeOutOfRange,
}

impl TryFrom<RegisterOrgBody> for RegisterOrgRequest {
    type Error = RegisterBodyError;

    fn try_from(body: RegisterOrgBody) -> Result<Self, Self::Error> {
        let email = body.email.trim().to_owned();
        if email.is_empty() || !email.contains('@') {
            return Err(RegisterBodyError::InvalidEmail);
        }
        if body.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(RegisterBodyError::PasswordTooShort);
        }
        if !(-90.0..=90.0).contains(&body.latitude) {
            return Err(RegisterBodyError::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&body.longitude) {
            return Err(RegisterBodyError::LongitudeOutOfRange);
        }

        Ok(Self {
            name: body.name,
            author_name: body.author_name,
            email,
            whatsapp: body.whatsapp,
            password: Zeroizing::new(body.password),
            cep: body.cep,
            state: body.state,
            city: body.city,
            neighborhood: body.neighborhood,
            street: body.street,
            latitude: body.latitude,
            longitude: body.longitude,
        })
    }
}

fn map_register_body_error(err: RegisterBodyError) -> Error {
    match err {
        RegisterBodyError::InvalidEmail => Error::invalid_request("email must be a valid address")
            .with_details(json!({ "field": "email", "code": "invalid_email" })),
        RegisterBodyError::PasswordTooShort => Error::invalid_request(format!(
            "password must have at least {PASSWORD_MIN_LEN} characters"
        ))
        .with_details(json!({ "field": "password", "code": "password_too_short" })),
        RegisterBodyError::LatitudeOutOfRange => {
            Error::invalid_request("latitude must be between -90 and 90")
                .with_details(json!({ "field": "latitude", "code": "out_of_range" }))
        }
        RegisterBodyError::LongitudeOutOfRange => {
            Error::invalid_request("longitude must be between -180 and 180")
                .with_details(json!({ "field": "longitude", "code": "out_of_range" }))
        }
    }
}

/// Register a new organization.
#[utoipa::path(
    post,
    path = "/api/v1/orgs",
    request_body = RegisterOrgBody,
    responses(
        (status = 201, description = "Organization registered"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["orgs"],
    operation_id = "registerOrg",
    security([])
)]
#[post("/orgs")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterOrgBody>,
) -> ApiResult<HttpResponse> {
    let request =
        RegisterOrgRequest::try_from(payload.into_inner()).map_err(map_register_body_error)?;
    state.registration.register(request).await?;
    Ok(HttpResponse::Created().finish())
}

/// Login request body for `POST /api/v1/sessions`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginBody {
    #[schema(example = "contact@shelter.org")]
    pub email: String,
    #[schema(example = "secret-password")]
    pub password: String,
}

impl TryFrom<LoginBody> for OrgCredentials {
    type Error = OrgValidationError;

    fn try_from(value: LoginBody) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_credentials_error(err: OrgValidationError) -> Error {
    match err {
        OrgValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        OrgValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
        OrgValidationError::InvalidId => Error::invalid_request(err.to_string()),
    }
}

/// Authenticate an organization and establish a session.
///
/// On success the authenticated organization id is persisted in the
/// session cookie; no token is returned in the body.
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["orgs"],
    operation_id = "login",
    security([])
)]
#[post("/sessions")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginBody>,
) -> ApiResult<HttpResponse> {
    let credentials =
        OrgCredentials::try_from(payload.into_inner()).map_err(map_credentials_error)?;
    let org = state.login.authenticate(&credentials).await?;
    session.persist_org(&org.id)?;
    Ok(HttpResponse::Ok().finish())
}
