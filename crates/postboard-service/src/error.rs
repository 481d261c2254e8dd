use postboard_gate::ValidationError;
use postboard_ledger::LedgerError;
use postboard_store::StoreError;
use postboard_types::{BlobId, PostId};
use thiserror::Error;

/// Errors surfaced by the post service.
///
/// Validation kinds are caller mistakes and are never retried. Every fault
/// of the underlying storage collapses into [`PostError::StorageFailure`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
    #[error("post has no content and no media")]
    EmptyPost,

    #[error("post content is too long: {length} characters (max {max})")]
    ContentTooLong { length: usize, max: usize },

    #[error("media is too large: {size} bytes (max {max})")]
    MediaTooLarge { size: u64, max: u64 },

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("post not found: {0}")]
    NotFound(PostId),

    #[error("blob not found: {0}")]
    BlobNotFound(BlobId),

    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl PostError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyPost => "empty_post",
            Self::ContentTooLong { .. } => "content_too_long",
            Self::MediaTooLarge { .. } => "media_too_large",
            Self::UnsupportedMediaType(_) => "unsupported_media_type",
            Self::NotFound(_) => "not_found",
            Self::BlobNotFound(_) => "blob_not_found",
            Self::StorageFailure(_) => "storage_failure",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyPost
                | Self::ContentTooLong { .. }
                | Self::MediaTooLarge { .. }
                | Self::UnsupportedMediaType(_)
        )
    }
}

impl From<ValidationError> for PostError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyPost => Self::EmptyPost,
            ValidationError::ContentTooLong { length, max } => Self::ContentTooLong { length, max },
            ValidationError::MediaTooLarge { size, max } => Self::MediaTooLarge { size, max },
            ValidationError::UnsupportedMediaType { content_type, .. } => {
                Self::UnsupportedMediaType(content_type)
            }
        }
    }
}

impl From<StoreError> for PostError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::BlobNotFound(id),
            other => Self::StorageFailure(other.to_string()),
        }
    }
}

impl From<LedgerError> for PostError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(id) => Self::NotFound(id),
            other => Self::StorageFailure(other.to_string()),
        }
    }
}

/// Result alias for service operations.
pub type PostResult<T> = Result<T, PostError>;

#[cfg(test)]
mod tests {
    use super::*;
    use postboard_types::MediaKind;

    #[test]
    fn validation_errors_keep_their_kind() {
        let err: PostError = ValidationError::UnsupportedMediaType {
            content_type: "audio/mpeg".into(),
            kind: MediaKind::Audio,
        }
        .into();
        assert_eq!(err, PostError::UnsupportedMediaType("audio/mpeg".into()));
        assert!(err.is_validation());
        assert_eq!(err.kind(), "unsupported_media_type");
    }

    #[test]
    fn storage_faults_are_opaque() {
        let err: PostError = StoreError::QuotaExceeded {
            requested: 10,
            available: 2,
        }
        .into();
        assert!(matches!(err, PostError::StorageFailure(_)));

        let err: PostError = LedgerError::CapacityExhausted { capacity: 3 }.into();
        assert_eq!(err.kind(), "storage_failure");
        assert!(!err.is_validation());
    }

    #[test]
    fn ledger_miss_is_not_found() {
        let err: PostError = LedgerError::NotFound(PostId::new(7)).into();
        assert_eq!(err, PostError::NotFound(PostId::new(7)));
    }
}
