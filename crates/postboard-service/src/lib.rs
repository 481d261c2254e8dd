//! Service facade for Postboard.
//!
//! [`PostService`] composes the gate, blob store, ledger, and hashtag index
//! into the four public board operations. It is the only place that mutates
//! board state, and it does so under a single lock so that a post and its
//! index entries always become visible together.
//!
//! # Example
//!
//! ```
//! use postboard_service::{PostDraft, PostService};
//!
//! let service = PostService::in_memory();
//! let id = service.create_post(PostDraft::text("hello #World")).unwrap();
//! let tagged = service.get_posts_by_hashtag("#WORLD").unwrap();
//! assert_eq!(tagged[0].id, id);
//! ```

pub mod config;
pub mod draft;
pub mod error;
pub mod service;

pub use config::ServiceConfig;
pub use draft::PostDraft;
pub use error::{PostError, PostResult};
pub use service::{BoardStats, PostService};

// Re-export the types callers need to drive the service.
pub use postboard_store::{BlobHandle, ChannelObserver, MediaInput, ProgressEvent, ProgressObserver};
pub use postboard_types::{BlobId, MediaKind, MediaRef, Post, PostId, Timestamp};
