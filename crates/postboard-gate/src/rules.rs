use crate::error::{ValidationError, ValidationResult};
use crate::rule::{PostCandidate, ValidationRule};

/// A post needs text or media.
pub struct NonEmptyRule;

impl ValidationRule for NonEmptyRule {
    fn name(&self) -> &str {
        "non-empty"
    }

    fn evaluate(&self, candidate: &PostCandidate<'_>) -> ValidationResult<()> {
        if candidate.trimmed().is_empty() && candidate.media.is_none() {
            return Err(ValidationError::EmptyPost);
        }
        Ok(())
    }
}

/// Trimmed text must fit within `max_chars` Unicode scalar values.
pub struct ContentLengthRule {
    pub max_chars: usize,
}

impl ValidationRule for ContentLengthRule {
    fn name(&self) -> &str {
        "content-length"
    }

    fn evaluate(&self, candidate: &PostCandidate<'_>) -> ValidationResult<()> {
        let length = candidate.trimmed().chars().count();
        if length > self.max_chars {
            return Err(ValidationError::ContentTooLong {
                length,
                max: self.max_chars,
            });
        }
        Ok(())
    }
}

/// Declared media size must not exceed `max_bytes`.
pub struct MediaSizeRule {
    pub max_bytes: u64,
}

impl ValidationRule for MediaSizeRule {
    fn name(&self) -> &str {
        "media-size"
    }

    fn evaluate(&self, candidate: &PostCandidate<'_>) -> ValidationResult<()> {
        match candidate.media {
            Some(media) if media.size > self.max_bytes => Err(ValidationError::MediaTooLarge {
                size: media.size,
                max: self.max_bytes,
            }),
            _ => Ok(()),
        }
    }
}

/// Declared media must be an image or a video.
pub struct MediaKindRule;

impl ValidationRule for MediaKindRule {
    fn name(&self) -> &str {
        "media-kind"
    }

    fn evaluate(&self, candidate: &PostCandidate<'_>) -> ValidationResult<()> {
        match candidate.media {
            Some(media) if !media.kind.is_supported() => {
                Err(ValidationError::UnsupportedMediaType {
                    content_type: media.content_type.clone(),
                    kind: media.kind,
                })
            }
            _ => Ok(()),
        }
    }
}
