//! Media blob storage for Postboard.
//!
//! This crate owns the lifecycle of post attachments. Raw uploads are
//! streamed in chunks into a content-addressed [`BlobStore`], reporting
//! progress to registered [`ProgressObserver`]s; remote URLs are admitted as
//! pass-through references without copying bytes. Either way the caller gets
//! a [`BlobHandle`] with stable `resolve_url` / `resolve_bytes` accessors.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`InMemoryBlobStore`]: `HashMap`-based store for tests and embedding
//! - [`FsBlobStore`]: one file per blob under a root directory
//!
//! # Design Rules
//!
//! 1. Blobs are immutable once committed (content-addressing guarantees this).
//! 2. Stage-then-commit: chunks go to a staged writer; only a successful
//!    commit makes the blob visible. A dropped writer leaves nothing behind.
//! 3. Concurrent reads are always safe.
//! 4. Admission never takes a lock shared with the post ledger.
//! 5. Progress delivery is advisory: observers cannot stall or abort an upload.

pub mod config;
pub mod error;
pub mod fs;
pub mod handle;
pub mod manager;
pub mod memory;
pub mod progress;
pub mod traits;

pub use config::BlobConfig;
pub use error::{StoreError, StoreResult};
pub use fs::FsBlobStore;
pub use handle::BlobHandle;
pub use manager::{BlobManager, MediaInput};
pub use memory::InMemoryBlobStore;
pub use progress::{ChannelObserver, ProgressEvent, ProgressObserver};
pub use traits::{BlobStore, BlobWriter};
