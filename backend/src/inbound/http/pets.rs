//! Pet API handlers.
//!
//! ```text
//! POST /api/v1/pets {"name":"Buddy","age":"ADULTO",…}   (session required)
//! GET  /api/v1/pets/search?city=São Paulo&age=ADULTO
//! GET  /api/v1/pets/{pet_id}
//! ```
//!
//! `search` must be registered before the `{pet_id}` route so the literal
//! segment wins the match.

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::pet::PetDraft;
use crate::domain::ports::{CreatePetRequest, SearchPetsRequest};
use crate::domain::{
    AgeGroup, EnergyLevel, Environment, Error, Independence, Org, Pet, PetDetails, PetId, PetSize,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Pet representation returned by creation, search, and detail routes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PetDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    pub age: AgeGroup,
    pub size: PetSize,
    pub energy_level: EnergyLevel,
    pub independence: Independence,
    pub environment: Environment,
    pub adoption_requirements: Vec<String>,
    pub photos: Vec<String>,
    pub org_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Pet> for PetDto {
    fn from(pet: Pet) -> Self {
        Self {
            id: *pet.id.as_uuid(),
            name: pet.name,
            about: pet.about,
            age: pet.age,
            size: pet.size,
            energy_level: pet.energy_level,
            independence: pet.independence,
            environment: pet.environment,
            adoption_requirements: pet.adoption_requirements,
            photos: pet.photos,
            org_id: *pet.org_id.as_uuid(),
            created_at: pet.created_at,
        }
    }
}

/// Public profile of an organization, attached to pet details.
///
/// Never carries the password digest.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrgProfileDto {
    pub id: Uuid,
    pub name: String,
    pub author_name: String,
    pub email: String,
    pub whatsapp: String,
    pub cep: String,
    pub state: String,
    pub city: String,
    pub neighborhood: String,
    pub street: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl From<Org> for OrgProfileDto {
    fn from(org: Org) -> Self {
        Self {
            id: *org.id.as_uuid(),
            name: org.name,
            author_name: org.author_name,
            email: org.email,
            whatsapp: org.whatsapp,
            cep: org.cep,
            state: org.state,
            city: org.city,
            neighborhood: org.neighborhood,
            street: org.street,
            latitude: org.latitude,
            longitude: org.longitude,
            created_at: org.created_at,
        }
    }
}

/// Pet plus its owning organization's public profile.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PetDetailsDto {
    #[serde(flatten)]
    pub pet: PetDto,
    pub org: OrgProfileDto,
}

impl From<PetDetails> for PetDetailsDto {
    fn from(value: PetDetails) -> Self {
        Self {
            pet: value.pet.into(),
            org: value.org.into(),
        }
    }
}

/// Response envelope for a single pet.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PetEnvelope {
    pub pet: PetDto,
}

/// Response envelope for a pet with its organization.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PetDetailsEnvelope {
    pub pet: PetDetailsDto,
}

/// Response envelope for search results.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PetsEnvelope {
    pub pets: Vec<PetDto>,
}

/// Creation request body for `POST /api/v1/pets`.
///
/// Characteristic fields are wire tokens; the creation use-case validates
/// them against their literal sets.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreatePetBody {
    #[schema(example = "Buddy")]
    pub name: String,
    pub about: Option<String>,
    #[schema(example = "ADULTO")]
    pub age: String,
    #[schema(example = "MEDIO")]
    pub size: String,
    #[schema(example = "03")]
    pub energy_level: String,
    #[schema(example = "MEDIO")]
    pub independence: String,
    #[schema(example = "QUINTAL_PEQUENO")]
    pub environment: String,
    pub adoption_requirements: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}

impl From<CreatePetBody> for PetDraft {
    fn from(body: CreatePetBody) -> Self {
        Self {
            name: body.name,
            about: body.about,
            age: body.age,
            size: body.size,
            energy_level: body.energy_level,
            independence: body.independence,
            environment: body.environment,
            adoption_requirements: body.adoption_requirements,
            photos: body.photos,
        }
    }
}

/// Create a pet owned by the authenticated organization.
#[utoipa::path(
    post,
    path = "/api/v1/pets",
    request_body = CreatePetBody,
    responses(
        (status = 201, description = "Pet created", body = PetEnvelope),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Organization not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pets"],
    operation_id = "createPet"
)]
#[post("/pets")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePetBody>,
) -> ApiResult<HttpResponse> {
    let org_id = session.require_org_id()?;
    let pet = state
        .pet_command
        .create_pet(CreatePetRequest {
            org_id,
            draft: payload.into_inner().into(),
        })
        .await?;
    Ok(HttpResponse::Created().json(PetEnvelope { pet: pet.into() }))
}

/// Search filters for `GET /api/v1/pets/search`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchPetsParams {
    /// City fragment to match against the owning organization's city.
    pub city: String,
    /// Age token filter (FILHOTE, ADULTO, IDOSO).
    pub age: Option<String>,
    /// Size token filter (PEQUENO, MEDIO, GRANDE).
    pub size: Option<String>,
    /// Energy level token filter ("01".."05").
    pub energy_level: Option<String>,
    /// Independence token filter (BAIXO, MEDIO, ALTO).
    pub independence: Option<String>,
    /// Environment token filter.
    pub environment: Option<String>,
}

impl From<SearchPetsParams> for SearchPetsRequest {
    fn from(params: SearchPetsParams) -> Self {
        Self {
            city: params.city,
            age: params.age,
            size: params.size,
            energy_level: params.energy_level,
            independence: params.independence,
            environment: params.environment,
        }
    }
}

/// Search pets by city and optional characteristics.
#[utoipa::path(
    get,
    path = "/api/v1/pets/search",
    params(SearchPetsParams),
    responses(
        (status = 200, description = "Matching pets (possibly empty)", body = PetsEnvelope),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pets"],
    operation_id = "searchPets",
    security([])
)]
#[get("/pets/search")]
pub async fn search(
    state: web::Data<HttpState>,
    params: web::Query<SearchPetsParams>,
) -> ApiResult<web::Json<PetsEnvelope>> {
    let pets = state.pet_query.search_pets(params.into_inner().into()).await?;
    Ok(web::Json(PetsEnvelope {
        pets: pets.into_iter().map(PetDto::from).collect(),
    }))
}

/// Fetch one pet with its owning organization.
#[utoipa::path(
    get,
    path = "/api/v1/pets/{pet_id}",
    params(("pet_id" = Uuid, Path, description = "Pet identifier")),
    responses(
        (status = 200, description = "Pet details", body = PetDetailsEnvelope),
        (status = 400, description = "Malformed pet id", body = Error),
        (status = 404, description = "Pet not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pets"],
    operation_id = "petDetails",
    security([])
)]
#[get("/pets/{pet_id}")]
pub async fn details(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PetDetailsEnvelope>> {
    let pet_id =
        PetId::new(path.into_inner()).map_err(|err| Error::invalid_request(err.to_string()))?;
    let details = state.pet_query.pet_details(&pet_id).await?;
    Ok(web::Json(PetDetailsEnvelope {
        pet: details.into(),
    }))
}
