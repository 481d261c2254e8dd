//! JSON request and response bodies.

use postboard_service::{MediaInput, MediaKind, Post, PostDraft, PostId, PostService};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Body of `POST /v1/posts`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreatePostRequest {
    pub content: String,
    /// Explicit tag field, folded into the content.
    pub hashtags: Option<String>,
    pub media: Option<MediaPayload>,
}

/// Media attached to a create request.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MediaPayload {
    /// Externally hosted media, referenced by URL.
    Url {
        content_type: String,
        url: String,
        #[serde(default)]
        size: u64,
    },
    /// Media bytes sent inline as hex.
    Inline {
        content_type: String,
        data_hex: String,
    },
}

impl CreatePostRequest {
    pub fn into_draft(self) -> ServerResult<PostDraft> {
        let media = self.media.map(MediaPayload::into_input).transpose()?;
        Ok(PostDraft {
            content: self.content,
            tags: self.hashtags,
            media,
        })
    }
}

impl MediaPayload {
    fn into_input(self) -> ServerResult<MediaInput> {
        match self {
            Self::Url {
                content_type,
                url,
                size,
            } => Ok(MediaInput::from_url(url, content_type, size)),
            Self::Inline {
                content_type,
                data_hex,
            } => {
                let data = hex::decode(data_hex.trim())
                    .map_err(|e| ServerError::BadRequest(format!("media data_hex: {e}")))?;
                Ok(MediaInput::from_bytes(data, content_type))
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: PostId,
}

/// A post as rendered to clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct PostView {
    pub id: PostId,
    pub content: String,
    pub hashtags: Vec<String>,
    /// Nanoseconds since the Unix epoch.
    pub timestamp: u64,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MediaView {
    pub url: String,
    pub content_type: String,
    pub kind: MediaKind,
    pub size: u64,
}

impl PostView {
    pub fn render(post: Post, service: &PostService) -> Self {
        let media = post.media.as_ref().map(|media| MediaView {
            url: service.blob_handle(media).resolve_url().to_string(),
            content_type: media.descriptor.content_type.clone(),
            kind: media.descriptor.kind,
            size: media.descriptor.size,
        });
        Self {
            id: post.id,
            created_at: post.timestamp.to_rfc3339(),
            timestamp: post.timestamp.as_nanos(),
            content: post.content,
            hashtags: post.hashtags,
            media,
        }
    }

    pub fn render_all(posts: Vec<Post>, service: &PostService) -> Vec<Self> {
        posts
            .into_iter()
            .map(|post| Self::render(post, service))
            .collect()
    }
}
