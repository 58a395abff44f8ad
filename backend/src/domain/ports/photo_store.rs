//! Port abstraction for persisting pet photos.
//!
//! The photo store is a collaborator outside the matching core: it
//! accepts image bytes, enforces a media-type allow-list, and returns a
//! stable reference URL that pet creation accepts in its `photos` list.

use async_trait::async_trait;

/// Media types accepted for pet photos.
pub const ALLOWED_PHOTO_MEDIA_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Errors raised by photo store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhotoStoreError {
    /// The media type is outside the allow-list. Inbound adapters map
    /// this to a 4xx response.
    #[error("invalid file type: {media_type}; only JPEG, PNG and WebP are allowed")]
    InvalidMediaType { media_type: String },
    /// Writing the photo to backing storage failed.
    #[error("photo storage failed: {message}")]
    Storage { message: String },
}

impl PhotoStoreError {
    /// Helper for disallowed media types.
    pub fn invalid_media_type(media_type: impl Into<String>) -> Self {
        Self::InvalidMediaType {
            media_type: media_type.into(),
        }
    }

    /// Helper for backing-storage failures.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// A persisted photo and its stable reference URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    /// Name of the stored file, unique per upload.
    pub filename: String,
    /// Stable URL under which the photo is served.
    pub url: String,
}

/// Persistence contract for pet photos.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Persist one photo and return its stable reference.
    ///
    /// Rejects media types outside [`ALLOWED_PHOTO_MEDIA_TYPES`] with
    /// [`PhotoStoreError::InvalidMediaType`] before writing anything.
    async fn save(&self, bytes: &[u8], media_type: &str) -> Result<StoredPhoto, PhotoStoreError>;
}
