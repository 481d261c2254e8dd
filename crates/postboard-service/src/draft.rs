use postboard_store::MediaInput;

/// Unvalidated input to [`PostService::create_post`].
///
/// [`PostService::create_post`]: crate::PostService::create_post
#[derive(Debug, Default)]
pub struct PostDraft {
    /// Free text. May carry inline `#tags`.
    pub content: String,
    /// Optional explicit tag field, e.g. `"#music #Jazz"`. It is scanned
    /// like content and its tags are folded in before validation.
    pub tags: Option<String>,
    pub media: Option<MediaInput>,
}

impl PostDraft {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_media(mut self, media: MediaInput) -> Self {
        self.media = Some(media);
        self
    }
}
