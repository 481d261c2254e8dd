use postboard_types::MediaDescriptor;
use tracing::debug;

use crate::config::ValidationConfig;
use crate::error::ValidationResult;
use crate::rule::{PostCandidate, ValidationRule};
use crate::rules::{ContentLengthRule, MediaKindRule, MediaSizeRule, NonEmptyRule};

/// Ordered validation pipeline for candidate posts.
pub struct ContentValidator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ContentValidator {
    /// The standard pipeline with limits taken from `config`.
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            rules: vec![
                Box::new(NonEmptyRule),
                Box::new(ContentLengthRule {
                    max_chars: config.max_content_chars,
                }),
                Box::new(MediaSizeRule {
                    max_bytes: config.max_media_bytes,
                }),
                Box::new(MediaKindRule),
            ],
        }
    }

    /// A validator with no rules. Accepts everything.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; it runs after all rules already present.
    pub fn with_rule(mut self, rule: Box<dyn ValidationRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Check a candidate post. The first failing rule decides the error.
    pub fn validate(
        &self,
        content: &str,
        media: Option<&MediaDescriptor>,
    ) -> ValidationResult<()> {
        let candidate = PostCandidate::new(content, media);
        for rule in &self.rules {
            if let Err(err) = rule.evaluate(&candidate) {
                debug!(rule = rule.name(), error = %err, "candidate rejected");
                return Err(err);
            }
        }
        Ok(())
    }
}

impl Default for ContentValidator {
    fn default() -> Self {
        Self::new(&ValidationConfig::default())
    }
}

impl std::fmt::Debug for ContentValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentValidator")
            .field("rules", &self.rule_names())
            .finish()
    }
}
