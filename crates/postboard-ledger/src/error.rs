use postboard_types::PostId;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("post not found: {0}")]
    NotFound(PostId),

    #[error("ledger capacity exhausted ({capacity} posts)")]
    CapacityExhausted { capacity: usize },

    #[error("post identifier space exhausted")]
    IdSpaceExhausted,

    #[error("integrity violation at post {id}: {reason}")]
    IntegrityViolation { id: PostId, reason: String },
}

/// Convenience alias for ledger results.
pub type LedgerResult<T> = Result<T, LedgerError>;
