use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::fs::FsBlobStore;
use crate::memory::InMemoryBlobStore;
use crate::traits::BlobStore;

/// Blob storage configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobConfig {
    /// Directory for the filesystem backend. `None` keeps blobs in memory.
    pub dir: Option<PathBuf>,
    /// Upper bound on committed blob bytes. `None` means unlimited.
    pub quota_bytes: Option<u64>,
    /// Size of each chunk streamed to the backend during admission.
    pub chunk_size: usize,
    /// Prefix of the URLs handed out for stored blobs.
    ///
    /// Not read from config files: the server fills it in from its own
    /// `public_base_url` so blob links always point back at it.
    #[serde(skip)]
    pub public_base_url: String,
}

impl BlobConfig {
    pub const DEFAULT_CHUNK_SIZE: usize = 256 * 1024;

    /// Open the backend this configuration describes.
    pub fn open_store(&self) -> StoreResult<Arc<dyn BlobStore>> {
        Ok(match &self.dir {
            Some(dir) => Arc::new(FsBlobStore::open(dir, self.quota_bytes)?),
            None => Arc::new(InMemoryBlobStore::with_quota(self.quota_bytes)),
        })
    }
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            dir: None,
            quota_bytes: None,
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            public_base_url: "http://127.0.0.1:8787".into(),
        }
    }
}
