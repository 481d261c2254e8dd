//! Foundation types for Postboard.
//!
//! This crate provides the identity, temporal, and structural types shared by
//! every other Postboard crate, plus the hashtag normalizer that defines what
//! a canonical tag looks like.
//!
//! # Key Types
//!
//! - [`PostId`]: Monotonic ledger-assigned post identifier
//! - [`BlobId`]: Content-addressed blob identifier (domain-separated BLAKE3)
//! - [`Timestamp`]: Server-observed creation time in nanoseconds
//! - [`Clock`]: Time source injected into the service
//! - [`Post`]: Immutable ledger record
//! - [`MediaRef`]: Non-owning reference from a post to its blob
//!
//! # Hashtags
//!
//! [`hashtag::normalize`] and [`hashtag::extract_and_dedupe`] are the single
//! source of truth for tag canonicalization. Both the free-text scan and any
//! explicit tag field funnel through them.

pub mod error;
pub mod hashtag;
pub mod id;
pub mod media;
pub mod post;
pub mod temporal;

pub use error::TypeError;
pub use id::{BlobId, PostId};
pub use media::{BlobLocator, MediaDescriptor, MediaKind, MediaRef};
pub use post::{sort_newest_first, Post};
pub use temporal::{Clock, ManualClock, SystemClock, Timestamp};
