use serde::{Deserialize, Serialize};

/// Limits enforced by the built-in validation rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum trimmed content length, in Unicode scalar values.
    pub max_content_chars: usize,
    /// Maximum declared media size, in bytes.
    pub max_media_bytes: u64,
}

impl ValidationConfig {
    pub const DEFAULT_MAX_CONTENT_CHARS: usize = 5000;
    pub const DEFAULT_MAX_MEDIA_BYTES: u64 = 50 * 1024 * 1024;
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_content_chars: Self::DEFAULT_MAX_CONTENT_CHARS,
            max_media_bytes: Self::DEFAULT_MAX_MEDIA_BYTES,
        }
    }
}
