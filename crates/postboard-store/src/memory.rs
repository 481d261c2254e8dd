use std::collections::HashMap;
use std::sync::RwLock;

use bytes::Bytes;
use postboard_types::BlobId;

use crate::error::{StoreError, StoreResult};
use crate::traits::{BlobStore, BlobWriter};

/// In-memory, HashMap-based blob store.
///
/// Intended for tests and embedding. Blobs are held behind a `RwLock` for
/// safe concurrent access. An optional quota bounds the committed bytes;
/// writes that would cross it fail with [`StoreError::QuotaExceeded`].
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<BlobId, Bytes>>,
    quota: Option<u64>,
}

impl InMemoryBlobStore {
    /// Create a new empty store without a quota.
    pub fn new() -> Self {
        Self::with_quota(None)
    }

    pub fn with_quota(quota: Option<u64>) -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
            quota,
        }
    }

    fn used(&self) -> StoreResult<u64> {
        let map = self.blobs.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.values().map(|b| b.len() as u64).sum())
    }

    fn check_quota(&self, used: u64, requested: u64) -> StoreResult<()> {
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

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn read(&self, id: &BlobId) -> StoreResult<Option<Bytes>> {
        let map = self.blobs.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(id).cloned())
    }

    fn exists(&self, id: &BlobId) -> StoreResult<bool> {
        let map = self.blobs.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.contains_key(id))
    }

    fn begin_write(&self, size_hint: u64) -> StoreResult<Box<dyn BlobWriter + '_>> {
        self.check_quota(self.used()?, size_hint)?;
        Ok(Box::new(MemoryWriter {
            store: self,
            buffer: Vec::with_capacity(usize::try_from(size_hint).unwrap_or(0)),
        }))
    }

    fn total_bytes(&self) -> StoreResult<u64> {
        self.used()
    }

    fn blob_count(&self) -> StoreResult<usize> {
        let map = self.blobs.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.len())
    }
}

struct MemoryWriter<'a> {
    store: &'a InMemoryBlobStore,
    buffer: Vec<u8>,
}

impl BlobWriter for MemoryWriter<'_> {
    fn write_chunk(&mut self, chunk: &[u8]) -> StoreResult<()> {
        let staged = (self.buffer.len() + chunk.len()) as u64;
        self.store.check_quota(self.store.used()?, staged)?;
        self.buffer.extend_from_slice(chunk);
        Ok(())
    }

    fn written(&self) -> u64 {
        self.buffer.len() as u64
    }

    fn commit(self: Box<Self>, id: BlobId) -> StoreResult<()> {
        let MemoryWriter { store, buffer } = *self;
        let mut map = store.blobs.write().map_err(|_| StoreError::Poisoned)?;
        if map.contains_key(&id) {
            return Ok(());
        }
        // Re-check under the write lock: concurrent uploads may have landed.
        let used: u64 = map.values().map(|b| b.len() as u64).sum();
        store.check_quota(used, buffer.len() as u64)?;
        map.insert(id, Bytes::from(buffer));
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.blob_count().unwrap_or_default();
        f.debug_struct("InMemoryBlobStore")
            .field("blob_count", &count)
            .field("quota", &self.quota)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(store: &InMemoryBlobStore, data: &[u8]) -> StoreResult<BlobId> {
        let id = BlobId::digest(data);
        let mut writer = store.begin_write(data.len() as u64)?;
        writer.write_chunk(data)?;
        writer.commit(id)?;
        Ok(id)
    }

    #[test]
    fn write_and_read_blob() {
        let store = InMemoryBlobStore::new();
        let id = put(&store, b"hello world").unwrap();
        let read_back = store.read(&id).unwrap().expect("should exist");
        assert_eq!(&read_back[..], b"hello world");
        assert!(store.exists(&id).unwrap());
    }

    #[test]
    fn read_missing_blob_returns_none() {
        let store = InMemoryBlobStore::new();
        assert!(store.read(&BlobId::digest(b"missing")).unwrap().is_none());
    }

    #[test]
    fn same_content_is_stored_once() {
        let store = InMemoryBlobStore::new();
        let id1 = put(&store, b"identical").unwrap();
        let id2 = put(&store, b"identical").unwrap();
        assert_eq!(id1, id2);
        assert_eq!(store.blob_count().unwrap(), 1);
    }

    #[test]
    fn uncommitted_writer_leaves_no_trace() {
        let store = InMemoryBlobStore::new();
        {
            let mut writer = store.begin_write(4).unwrap();
            writer.write_chunk(b"abcd").unwrap();
            assert_eq!(writer.written(), 4);
        }
        assert_eq!(store.blob_count().unwrap(), 0);
        assert_eq!(store.total_bytes().unwrap(), 0);
    }

    #[test]
    fn quota_rejects_oversized_hint() {
        let store = InMemoryBlobStore::with_quota(Some(10));
        let err = store.begin_write(11).err().expect("should refuse");
        assert!(matches!(
            err,
            StoreError::QuotaExceeded {
                requested: 11,
                available: 10
            }
        ));
    }

    #[test]
    fn quota_rejects_chunk_that_crosses_it() {
        let store = InMemoryBlobStore::with_quota(Some(8));
        put(&store, b"12345").unwrap();

        let mut writer = store.begin_write(0).unwrap();
        writer.write_chunk(b"ab").unwrap();
        let err = writer.write_chunk(b"cd").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { .. }));
        assert_eq!(store.total_bytes().unwrap(), 5);
    }

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryBlobStore::new());
        let id = put(&store, b"shared data").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let bytes = store.read(&id).unwrap().expect("present");
                    assert_eq!(BlobId::digest(&bytes), id);
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }

    #[test]
    fn debug_format() {
        let store = InMemoryBlobStore::new();
        put(&store, b"x").unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryBlobStore"));
        assert!(debug.contains("blob_count"));
    }
}
