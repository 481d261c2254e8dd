use postboard_types::MediaDescriptor;

use crate::error::ValidationResult;

/// What the gate sees of a post before admission.
#[derive(Clone, Copy, Debug)]
pub struct PostCandidate<'a> {
    pub content: &'a str,
    pub media: Option<&'a MediaDescriptor>,
}

impl<'a> PostCandidate<'a> {
    pub fn new(content: &'a str, media: Option<&'a MediaDescriptor>) -> Self {
        Self { content, media }
    }

    /// Content with surrounding whitespace removed.
    pub fn trimmed(&self) -> &'a str {
        self.content.trim()
    }
}

/// A single check in the validation pipeline.
///
/// Rules are evaluated in order and the first failure wins, so a rule may
/// assume every earlier rule passed. The trait is object-safe and
/// `Send + Sync` so rules can be stored in a `Vec<Box<dyn ValidationRule>>`.
pub trait ValidationRule: Send + Sync {
    /// Short name used in logs (e.g., "non-empty", "media-size").
    fn name(&self) -> &str;

    fn evaluate(&self, candidate: &PostCandidate<'_>) -> ValidationResult<()>;
}
