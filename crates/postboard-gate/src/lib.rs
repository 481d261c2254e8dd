//! Admission gate for Postboard.
//!
//! Every candidate post passes through a [`ContentValidator`] before any
//! state is touched. The validator runs an ordered list of
//! [`ValidationRule`]s; the first failing rule decides the error.
//!
//! # Built-in Rules (in evaluation order)
//!
//! 1. [`NonEmptyRule`]: text or media must be present
//! 2. [`ContentLengthRule`]: trimmed text within the character limit
//! 3. [`MediaSizeRule`]: declared media size within the byte limit
//! 4. [`MediaKindRule`]: declared media is an image or a video
//!
//! Validation is a pure function of declared metadata. It never inspects
//! media bytes and has no side effects.

pub mod config;
pub mod error;
pub mod rule;
pub mod rules;
pub mod validator;

pub use config::ValidationConfig;
pub use error::{ValidationError, ValidationResult};
pub use rule::{PostCandidate, ValidationRule};
pub use rules::{ContentLengthRule, MediaKindRule, MediaSizeRule, NonEmptyRule};
pub use validator::ContentValidator;
