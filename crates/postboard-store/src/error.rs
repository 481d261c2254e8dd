use postboard_types::BlobId;

/// Errors from blob storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested blob was not found.
    #[error("blob not found: {0}")]
    NotFound(BlobId),

    /// Committing the write would exceed the configured storage quota.
    #[error("storage quota exceeded: {requested} bytes requested, {available} available")]
    QuotaExceeded { requested: u64, available: u64 },

    /// Content hash mismatch on read (data corruption).
    #[error("hash mismatch for {id}: stored bytes hash to {computed}")]
    HashMismatch { id: BlobId, computed: BlobId },

    /// The blob is hosted externally; its bytes are not held by this store.
    #[error("blob bytes are hosted externally at {0}")]
    External(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal lock was poisoned by a panicking writer.
    #[error("blob store lock poisoned")]
    Poisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
