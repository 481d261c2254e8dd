use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::BlobId;

/// Declared media class of an attachment.
///
/// Derived from the declared MIME content type. Only [`MediaKind::Image`]
/// and [`MediaKind::Video`] are accepted on posts; the other variants exist
/// so a rejected upload can still be described.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Other,
}

impl MediaKind {
    /// Classify a MIME content type such as `image/png` or `video/mp4`.
    pub fn from_content_type(content_type: &str) -> Self {
        let ct = content_type.trim().to_ascii_lowercase();
        if ct.starts_with("image/") {
            Self::Image
        } else if ct.starts_with("video/") {
            Self::Video
        } else if ct.starts_with("audio/") {
            Self::Audio
        } else {
            Self::Other
        }
    }

    /// Whether posts may carry media of this kind.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Image | Self::Video)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Declared metadata of an attachment: what the client says it is.
///
/// Validation looks only at this descriptor, never at decoded bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub content_type: String,
    pub kind: MediaKind,
    /// Declared size in bytes.
    pub size: u64,
}

impl MediaDescriptor {
    pub fn new(content_type: impl Into<String>, size: u64) -> Self {
        let content_type = content_type.into();
        let kind = MediaKind::from_content_type(&content_type);
        Self {
            content_type,
            kind,
            size,
        }
    }
}

/// Where the bytes of a blob live.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlobLocator {
    /// Bytes held by the blob store under a content-addressed id.
    Stored { id: BlobId },
    /// Bytes hosted elsewhere; only the URL is recorded.
    External { url: String },
}

impl BlobLocator {
    pub fn stored_id(&self) -> Option<BlobId> {
        match self {
            Self::Stored { id } => Some(*id),
            Self::External { .. } => None,
        }
    }
}

/// Non-owning reference from a post to its media blob.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub locator: BlobLocator,
    pub descriptor: MediaDescriptor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_content_types() {
        assert_eq!(MediaKind::from_content_type("image/png"), MediaKind::Image);
        assert_eq!(MediaKind::from_content_type("Video/MP4"), MediaKind::Video);
        assert_eq!(MediaKind::from_content_type("audio/mpeg"), MediaKind::Audio);
        assert_eq!(
            MediaKind::from_content_type("application/pdf"),
            MediaKind::Other
        );
        assert_eq!(MediaKind::from_content_type(""), MediaKind::Other);
    }

    #[test]
    fn only_image_and_video_are_supported() {
        assert!(MediaKind::Image.is_supported());
        assert!(MediaKind::Video.is_supported());
        assert!(!MediaKind::Audio.is_supported());
        assert!(!MediaKind::Other.is_supported());
    }

    #[test]
    fn descriptor_derives_kind() {
        let d = MediaDescriptor::new("image/jpeg", 1024);
        assert_eq!(d.kind, MediaKind::Image);
        assert_eq!(d.size, 1024);
    }

    #[test]
    fn locator_json_shape() {
        let external = BlobLocator::External {
            url: "https://cdn.example/cat.gif".into(),
        };
        let json = serde_json::to_value(&external).unwrap();
        assert_eq!(json["type"], "external");
        assert_eq!(json["url"], "https://cdn.example/cat.gif");
        assert!(external.stored_id().is_none());

        let id = BlobId::digest(b"x");
        assert_eq!(BlobLocator::Stored { id }.stored_id(), Some(id));
    }
}
