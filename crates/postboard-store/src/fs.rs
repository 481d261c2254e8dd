use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use bytes::Bytes;
use postboard_types::BlobId;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{BlobStore, BlobWriter};

const STAGING_PREFIX: &str = ".upload-";

/// Filesystem blob store: one file per blob under a root directory.
///
/// Layout mirrors a git object directory: `<root>/<2 hex>/<62 hex>`. Writes
/// are staged in a temporary file inside `<root>` and atomically renamed
/// into place on commit, so a crash or an abandoned upload never leaves a
/// partial blob visible. Reads re-hash the bytes and fail on corruption.
/// Commits are serialized so the quota check and the usage counter agree.
pub struct FsBlobStore {
    root: PathBuf,
    quota: Option<u64>,
    used: AtomicU64,
    commit_lock: Mutex<()>,
}

impl FsBlobStore {
    /// Open (or create) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>, quota: Option<u64>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        let store = Self {
            root,
            quota,
            used: AtomicU64::new(0),
            commit_lock: Mutex::new(()),
        };
        let (bytes, count) = store.scan()?;
        store.used.store(bytes, Ordering::SeqCst);
        debug!(root = %store.root.display(), blobs = count, bytes, "blob store opened");
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, id: &BlobId) -> PathBuf {
        let hex = id.to_hex();
        self.root.join(&hex[..2]).join(&hex[2..])
    }

    /// Walk the fan-out directories, returning (total bytes, blob count).
    fn scan(&self) -> StoreResult<(u64, usize)> {
        let mut bytes = 0;
        let mut count = 0;
        for shard in fs::read_dir(&self.root)? {
            let shard = shard?;
            if !shard.file_type()?.is_dir() {
                continue;
            }
            for entry in fs::read_dir(shard.path())? {
                let entry = entry?;
                if entry.file_type()?.is_file() {
                    bytes += entry.metadata()?.len();
                    count += 1;
                }
            }
        }
        Ok((bytes, count))
    }

    fn check_quota(&self, requested: u64) -> StoreResult<()> {
        let used = self.used.load(Ordering::SeqCst);
        match self.quota {
            Some(quota) if used.saturating_add(requested) > quota => {
                Err(StoreError::QuotaExceeded {
                    requested,
                    available: quota.saturating_sub(used),
                })
            }
            _ => Ok(()),
        }
    }
}

impl BlobStore for FsBlobStore {
    fn read(&self, id: &BlobId) -> StoreResult<Option<Bytes>> {
        let data = match fs::read(self.blob_path(id)) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let computed = BlobId::digest(&data);
        if computed != *id {
            return Err(StoreError::HashMismatch { id: *id, computed });
        }
        Ok(Some(Bytes::from(data)))
    }

    fn exists(&self, id: &BlobId) -> StoreResult<bool> {
        Ok(self.blob_path(id).is_file())
    }

    fn begin_write(&self, size_hint: u64) -> StoreResult<Box<dyn BlobWriter + '_>> {
        self.check_quota(size_hint)?;
        let file = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempfile_in(&self.root)?;
        Ok(Box::new(FsWriter {
            store: self,
            file,
            written: 0,
        }))
    }

    fn total_bytes(&self) -> StoreResult<u64> {
        Ok(self.used.load(Ordering::SeqCst))
    }

    fn blob_count(&self) -> StoreResult<usize> {
        Ok(self.scan()?.1)
    }
}

struct FsWriter<'a> {
    store: &'a FsBlobStore,
    file: NamedTempFile,
    written: u64,
}

impl BlobWriter for FsWriter<'_> {
    fn write_chunk(&mut self, chunk: &[u8]) -> StoreResult<()> {
        self.store.check_quota(self.written + chunk.len() as u64)?;
        self.file.write_all(chunk)?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    fn written(&self) -> u64 {
        self.written
    }

    fn commit(self: Box<Self>, id: BlobId) -> StoreResult<()> {
        let FsWriter {
            store,
            mut file,
            written,
        } = *self;
        let path = store.blob_path(&id);
        let _guard = store.commit_lock.lock().map_err(|_| StoreError::Poisoned)?;
        if path.is_file() {
            return Ok(());
        }
        store.check_quota(written)?;
        file.flush()?;
        file.as_file().sync_all()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        file.persist(&path).map_err(|e| e.error)?;
        store.used.fetch_add(written, Ordering::SeqCst);
        Ok(())
    }
}

impl std::fmt::Debug for FsBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsBlobStore")
            .field("root", &self.root)
            .field("used", &self.used.load(Ordering::SeqCst))
            .field("quota", &self.quota)
            .finish()
    }
}
