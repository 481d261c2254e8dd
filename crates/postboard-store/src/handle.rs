use std::sync::Arc;

use bytes::Bytes;
use postboard_types::{BlobId, BlobLocator, MediaDescriptor, MediaRef};

use crate::error::{StoreError, StoreResult};
use crate::traits::BlobStore;

/// URL under which a stored blob is served.
pub fn blob_url(public_base_url: &str, id: &BlobId) -> String {
    format!("{}/v1/blobs/{}", public_base_url.trim_end_matches('/'), id.to_hex())
}

/// Stable retrieval handle for an admitted blob.
///
/// The URL is fixed when the handle is built, so clients may cache it for
/// the lifetime of the owning post. Both accessors are idempotent.
#[derive(Clone)]
pub struct BlobHandle {
    media: MediaRef,
    url: String,
    store: Arc<dyn BlobStore>,
}

impl BlobHandle {
    pub(crate) fn new(media: MediaRef, public_base_url: &str, store: Arc<dyn BlobStore>) -> Self {
        let url = match &media.locator {
            BlobLocator::Stored { id } => blob_url(public_base_url, id),
            BlobLocator::External { url } => url.clone(),
        };
        Self { media, url, store }
    }

    /// The reference a post records for this blob.
    pub fn media_ref(&self) -> &MediaRef {
        &self.media
    }

    pub fn into_media_ref(self) -> MediaRef {
        self.media
    }

    pub fn locator(&self) -> &BlobLocator {
        &self.media.locator
    }

    pub fn descriptor(&self) -> &MediaDescriptor {
        &self.media.descriptor
    }

    /// Stable URL for the blob: the store's serving URL for uploaded bytes,
    /// or the original address for external references.
    pub fn resolve_url(&self) -> &str {
        &self.url
    }

    /// The blob bytes.
    ///
    /// External references are not fetched; they fail with
    /// [`StoreError::External`].
    pub fn resolve_bytes(&self) -> StoreResult<Bytes> {
        match &self.media.locator {
            BlobLocator::Stored { id } => self.store.read(id)?.ok_or(StoreError::NotFound(*id)),
            BlobLocator::External { url } => Err(StoreError::External(url.clone())),
        }
    }
}

impl std::fmt::Debug for BlobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobHandle")
            .field("locator", &self.media.locator)
            .field("url", &self.url)
            .finish()
    }
}
