//! Pet photo upload handler.
//!
//! Accepts the raw image body with its `Content-Type` header, delegates
//! to the photo store collaborator, and returns the stable URL that pet
//! creation accepts in its `photos` list.

use actix_web::{HttpMessage, HttpRequest, HttpResponse, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::PhotoStoreError;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// A stored photo reference.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PhotoDto {
    #[schema(example = "7d4a…c2.png")]
    pub filename: String,
    #[schema(example = "/uploads/pets/7d4a…c2.png")]
    pub url: String,
}

/// Response envelope for an uploaded photo.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PhotoEnvelope {
    pub photo: PhotoDto,
}

fn map_photo_store_error(err: PhotoStoreError) -> Error {
    match err {
        PhotoStoreError::InvalidMediaType { .. } => Error::invalid_request(err.to_string()),
        PhotoStoreError::Storage { message } => {
            Error::internal(format!("photo storage failed: {message}"))
        }
    }
}

/// Upload one pet photo.
///
/// The body is the raw image; the media type comes from `Content-Type`.
/// Only JPEG, PNG, and WebP are accepted.
#[utoipa::path(
    post,
    path = "/api/v1/pets/photos",
    request_body(content = Vec<u8>, content_type = "image/jpeg"),
    responses(
        (status = 201, description = "Photo stored", body = PhotoEnvelope),
        (status = 400, description = "Unsupported media type", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pets"],
    operation_id = "uploadPetPhoto"
)]
#[post("/pets/photos")]
pub async fn upload(
    state: web::Data<HttpState>,
    session: SessionContext,
    request: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    session.require_org_id()?;

    let media_type = request.content_type().to_owned();
    let stored = state
        .photos
        .save(&body, &media_type)
        .await
        .map_err(map_photo_store_error)?;

    Ok(HttpResponse::Created().json(PhotoEnvelope {
        photo: PhotoDto {
            filename: stored.filename,
            url: stored.url,
        },
    }))
}
