use postboard_types::MediaKind;

/// Reasons a candidate post is refused admission.
///
/// These are caller mistakes: they are reported synchronously, never
/// retried, and never leave a trace in the board.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Neither text nor media was supplied.
    #[error("post has no content and no media")]
    EmptyPost,

    /// Trimmed text exceeds the character limit.
    #[error("post content is too long: {length} characters (max {max})")]
    ContentTooLong { length: usize, max: usize },

    /// Declared media size exceeds the byte limit.
    #[error("media is too large: {size} bytes (max {max})")]
    MediaTooLarge { size: u64, max: u64 },

    /// Declared media is neither an image nor a video.
    #[error("unsupported media type {content_type:?} ({kind}); only images and videos are accepted")]
    UnsupportedMediaType { content_type: String, kind: MediaKind },
}

/// Convenience alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;
