//! Filesystem-backed `PhotoStore` adapter.
//!
//! Writes uploaded photos under `<root>/pets` with a UUID filename and
//! the canonical extension for the media type, and hands back the URL
//! under which the static-file route serves them.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{PhotoStore, PhotoStoreError, StoredPhoto};

/// Canonical file extension for an allow-listed media type.
fn extension_for(media_type: &str) -> Option<&'static str> {
    match media_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Photo persistence under a local upload directory.
#[derive(Debug, Clone)]
pub struct FilesystemPhotoStore {
    root: PathBuf,
    public_prefix: String,
}

impl FilesystemPhotoStore {
    /// Create a store rooted at the given upload directory.
    ///
    /// Files land in `<root>/pets`; URLs are formed as
    /// `<public_prefix>/pets/<filename>`.
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }
}

#[async_trait]
impl PhotoStore for FilesystemPhotoStore {
    async fn save(&self, bytes: &[u8], media_type: &str) -> Result<StoredPhoto, PhotoStoreError> {
        let extension = extension_for(media_type)
            .ok_or_else(|| PhotoStoreError::invalid_media_type(media_type))?;

        let filename = format!("{}.{extension}", Uuid::new_v4());
        let directory = self.root.join("pets");
        tokio::fs::create_dir_all(&directory)
            .await
            .map_err(|err| PhotoStoreError::storage(err.to_string()))?;

        let path = directory.join(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|err| PhotoStoreError::storage(err.to_string()))?;

        debug!(path = %path.display(), "photo stored");
        Ok(StoredPhoto {
            url: format!("{}/pets/{filename}", self.public_prefix),
            filename,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::ALLOWED_PHOTO_MEDIA_TYPES;
    use rstest::rstest;

    fn store(root: &std::path::Path) -> FilesystemPhotoStore {
        FilesystemPhotoStore::new(root, "/uploads")
    }

    #[test]
    fn every_allowed_media_type_has_an_extension() {
        for media_type in ALLOWED_PHOTO_MEDIA_TYPES {
            assert!(extension_for(media_type).is_some(), "no extension for {media_type}");
        }
    }

    #[tokio::test]
    async fn saves_allowed_media_and_returns_stable_url() {
        let dir = tempfile::tempdir().expect("temp dir");
        let sut = store(dir.path());

        let stored = sut
            .save(b"not-really-a-png", "image/png")
            .await
            .expect("allowed media saves");

        assert!(stored.url.starts_with("/uploads/pets/"));
        assert!(stored.filename.ends_with(".png"));
        let on_disk = tokio::fs::read(dir.path().join("pets").join(&stored.filename))
            .await
            .expect("file exists");
        assert_eq!(on_disk, b"not-really-a-png");
    }

    #[rstest]
    #[case("image/gif")]
    #[case("application/pdf")]
    #[case("text/html")]
    #[tokio::test]
    async fn rejects_disallowed_media_types(#[case] media_type: &str) {
        let dir = tempfile::tempdir().expect("temp dir");
        let sut = store(dir.path());

        let err = sut
            .save(b"payload", media_type)
            .await
            .expect_err("disallowed media must fail");
        assert!(matches!(err, PhotoStoreError::InvalidMediaType { .. }));

        // Nothing was written for the rejected upload.
        assert!(!dir.path().join("pets").exists());
    }

    #[tokio::test]
    async fn filenames_are_unique_per_upload() {
        let dir = tempfile::tempdir().expect("temp dir");
        let sut = store(dir.path());

        let first = sut.save(b"a", "image/jpeg").await.expect("saves");
        let second = sut.save(b"b", "image/jpeg").await.expect("saves");
        assert_ne!(first.filename, second.filename);
    }
}
