use bytes::Bytes;
use postboard_types::BlobId;

use crate::error::StoreResult;

/// Content-addressed blob store.
///
/// All implementations must satisfy these invariants:
/// - Blobs are immutable once committed. The same bytes always map to the
///   same [`BlobId`], so committing an existing id is a no-op.
/// - Stage-then-commit: bytes written through a [`BlobWriter`] are invisible
///   until [`BlobWriter::commit`] succeeds. Dropping the writer discards them.
/// - Concurrent reads are always safe.
/// - All I/O errors are propagated, never silently ignored.
pub trait BlobStore: Send + Sync {
    /// Read a blob by id.
    ///
    /// Returns `Ok(None)` if the blob does not exist.
    fn read(&self, id: &BlobId) -> StoreResult<Option<Bytes>>;

    /// Check whether a blob exists.
    fn exists(&self, id: &BlobId) -> StoreResult<bool>;

    /// Start a staged write. `size_hint` is the expected total length and
    /// lets backends refuse early when it cannot possibly fit.
    fn begin_write(&self, size_hint: u64) -> StoreResult<Box<dyn BlobWriter + '_>>;

    /// Total bytes across all committed blobs.
    fn total_bytes(&self) -> StoreResult<u64>;

    /// Number of committed blobs.
    fn blob_count(&self) -> StoreResult<usize>;
}

/// A staged, not yet visible, blob write.
pub trait BlobWriter: Send {
    /// Append a chunk to the staged blob.
    fn write_chunk(&mut self, chunk: &[u8]) -> StoreResult<()>;

    /// Bytes staged so far.
    fn written(&self) -> u64;

    /// Publish the staged bytes under `id`.
    fn commit(self: Box<Self>, id: BlobId) -> StoreResult<()>;
}
