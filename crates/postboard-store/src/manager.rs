use std::sync::Arc;

use bytes::Bytes;
use postboard_types::{BlobId, BlobLocator, MediaDescriptor, MediaRef};
use tracing::{debug, info, warn};

use crate::config::BlobConfig;
use crate::error::{StoreError, StoreResult};
use crate::handle::BlobHandle;
use crate::memory::InMemoryBlobStore;
use crate::progress::{ProgressFanout, ProgressObserver};
use crate::traits::BlobStore;

/// Media supplied with a new post.
pub enum MediaInput {
    /// Raw bytes to be copied into the blob store.
    Bytes {
        data: Bytes,
        content_type: String,
        observers: Vec<Arc<dyn ProgressObserver>>,
    },
    /// Externally hosted bytes, admitted by reference only.
    Url {
        url: String,
        content_type: String,
        /// Declared size in bytes, used for validation and rendering hints.
        size_hint: u64,
    },
}

impl MediaInput {
    pub fn from_bytes(data: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self::Bytes {
            data: data.into(),
            content_type: content_type.into(),
            observers: Vec::new(),
        }
    }

    pub fn from_url(url: impl Into<String>, content_type: impl Into<String>, size_hint: u64) -> Self {
        Self::Url {
            url: url.into(),
            content_type: content_type.into(),
            size_hint,
        }
    }

    /// Register a progress observer. URL inputs upload nothing, so the
    /// observer is ignored for them.
    pub fn with_upload_progress(self, observer: impl ProgressObserver + 'static) -> Self {
        self.with_observer(Arc::new(observer))
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        if let Self::Bytes { observers, .. } = &mut self {
            observers.push(observer);
        }
        self
    }

    /// What the client declares about this media.
    pub fn descriptor(&self) -> MediaDescriptor {
        match self {
            Self::Bytes {
                data, content_type, ..
            } => MediaDescriptor::new(content_type.clone(), data.len() as u64),
            Self::Url {
                content_type,
                size_hint,
                ..
            } => MediaDescriptor::new(content_type.clone(), *size_hint),
        }
    }
}

impl std::fmt::Debug for MediaInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bytes {
                data,
                content_type,
                observers,
            } => f
                .debug_struct("MediaInput::Bytes")
                .field("len", &data.len())
                .field("content_type", content_type)
                .field("observers", &observers.len())
                .finish(),
            Self::Url {
                url,
                content_type,
                size_hint,
            } => f
                .debug_struct("MediaInput::Url")
                .field("url", url)
                .field("content_type", content_type)
                .field("size_hint", size_hint)
                .finish(),
        }
    }
}

/// Owns the lifecycle of media blobs.
///
/// Admission is the only potentially slow operation in the post path. It
/// takes no lock shared with the ledger: it finishes (or fails) before the
/// post is appended.
pub struct BlobManager {
    store: Arc<dyn BlobStore>,
    chunk_size: usize,
    public_base_url: String,
}

impl BlobManager {
    pub fn new(store: Arc<dyn BlobStore>, config: &BlobConfig) -> Self {
        Self {
            store,
            chunk_size: config.chunk_size.max(1),
            public_base_url: config.public_base_url.clone(),
        }
    }

    /// Open the backend named by `config` and wrap it.
    pub fn from_config(config: &BlobConfig) -> StoreResult<Self> {
        Ok(Self::new(config.open_store()?, config))
    }

    /// In-memory manager with default settings.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBlobStore::new()), &BlobConfig::default())
    }

    pub fn store(&self) -> &Arc<dyn BlobStore> {
        &self.store
    }

    /// Admit media and return its handle.
    ///
    /// Bytes are streamed to the backend chunk by chunk, reporting progress
    /// after each chunk and exactly 100 once committed. On failure nothing
    /// is committed and observers do not see 100.
    pub fn admit(&self, input: MediaInput) -> StoreResult<BlobHandle> {
        let descriptor = input.descriptor();
        let locator = match input {
            MediaInput::Bytes {
                data, observers, ..
            } => {
                let id = self.admit_bytes(&data, observers).inspect_err(|e| {
                    warn!(error = %e, bytes = data.len(), "blob admission failed");
                })?;
                info!(blob = %id.short_hex(), bytes = data.len(), kind = %descriptor.kind, "blob admitted");
                BlobLocator::Stored { id }
            }
            MediaInput::Url { url, .. } => {
                debug!(%url, kind = %descriptor.kind, "external blob referenced");
                BlobLocator::External { url }
            }
        };
        Ok(self.handle(&MediaRef {
            locator,
            descriptor,
        }))
    }

    fn admit_bytes(
        &self,
        data: &Bytes,
        observers: Vec<Arc<dyn ProgressObserver>>,
    ) -> StoreResult<BlobId> {
        let mut progress = ProgressFanout::new(observers, data.len() as u64);
        let mut writer = self.store.begin_write(data.len() as u64)?;
        let mut hasher = BlobId::hasher();

        for chunk in data.chunks(self.chunk_size) {
            writer.write_chunk(chunk)?;
            hasher.update(chunk);
            progress.report(writer.written());
        }

        let id = BlobId::from_hasher(&hasher);
        writer.commit(id)?;
        progress.finish();
        Ok(id)
    }

    /// Rebuild the handle for media recorded on a post.
    pub fn handle(&self, media: &MediaRef) -> BlobHandle {
        BlobHandle::new(media.clone(), &self.public_base_url, Arc::clone(&self.store))
    }

    /// Raw bytes of a stored blob.
    pub fn read(&self, id: &BlobId) -> StoreResult<Bytes> {
        self.store.read(id)?.ok_or(StoreError::NotFound(*id))
    }

    /// Total bytes held by the backend.
    pub fn stored_bytes(&self) -> StoreResult<u64> {
        self.store.total_bytes()
    }
}

impl std::fmt::Debug for BlobManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobManager")
            .field("chunk_size", &self.chunk_size)
            .field("public_base_url", &self.public_base_url)
            .finish()
    }
}
