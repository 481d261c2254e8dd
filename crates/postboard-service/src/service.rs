use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bytes::Bytes;
use postboard_gate::ContentValidator;
use postboard_index::HashtagIndex;
use postboard_ledger::PostLedger;
use postboard_store::{BlobHandle, BlobManager};
use postboard_types::{hashtag, BlobId, BlobLocator, Clock, MediaRef, Post, PostId, SystemClock};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ServiceConfig, ValidationConfig};
use crate::draft::PostDraft;
use crate::error::{PostError, PostResult};

/// Ledger and index, mutated together under one lock.
#[derive(Debug, Default)]
struct BoardState {
    ledger: PostLedger,
    index: HashtagIndex,
    /// Declared content type of each stored blob, first post wins.
    blob_types: HashMap<BlobId, String>,
}

/// Counters describing the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BoardStats {
    pub posts: usize,
    pub tags: usize,
    pub blob_bytes: u64,
}

/// The post board.
///
/// Construct one per board and share it behind an [`Arc`]. All methods take
/// `&self`; creates are serialized on the internal write lock, reads run
/// concurrently with each other.
pub struct PostService {
    state: RwLock<BoardState>,
    blobs: BlobManager,
    validator: ContentValidator,
    limits: ValidationConfig,
    clock: Arc<dyn Clock>,
}

impl PostService {
    /// Assemble a service from explicitly constructed parts.
    pub fn new(config: &ServiceConfig, blobs: BlobManager, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(BoardState {
                ledger: PostLedger::new(config.ledger.clone()),
                index: HashtagIndex::new(),
                blob_types: HashMap::new(),
            }),
            blobs,
            validator: ContentValidator::new(&config.validation),
            limits: config.validation.clone(),
            clock,
        }
    }

    /// Open the configured blob backend and use the system clock.
    pub fn from_config(config: &ServiceConfig) -> PostResult<Self> {
        let blobs = BlobManager::from_config(&config.blobs)?;
        Ok(Self::new(config, blobs, Arc::new(SystemClock)))
    }

    /// Default limits, in-memory blobs, system clock.
    pub fn in_memory() -> Self {
        Self::new(
            &ServiceConfig::default(),
            BlobManager::in_memory(),
            Arc::new(SystemClock),
        )
    }

    /// Create a post and return its identifier.
    ///
    /// The body as typed is validated first; the explicit tag field is then
    /// folded into it, media is admitted, and only then are the ledger append
    /// and index update applied together. Any failure leaves the board
    /// exactly as it was.
    pub fn create_post(&self, draft: PostDraft) -> PostResult<PostId> {
        let PostDraft {
            content,
            tags,
            media,
        } = draft;

        let descriptor = media.as_ref().map(|m| m.descriptor());
        self.validator.validate(&content, descriptor.as_ref())?;
        let content = hashtag::compose_content(&content, tags.as_deref());

        let media_ref = match media {
            Some(input) => Some(self.blobs.admit(input)?.into_media_ref()),
            None => None,
        };
        let hashtags = hashtag::extract_and_dedupe(&content);

        let has_media = media_ref.is_some();
        let stored_type = media_ref.as_ref().and_then(|m| match &m.locator {
            BlobLocator::Stored { id } => Some((*id, m.descriptor.content_type.clone())),
            BlobLocator::External { .. } => None,
        });
        let mut state = self.write_state()?;
        let timestamp = self.clock.now();
        let id = state
            .ledger
            .append(content, hashtags.clone(), media_ref, timestamp)
            .inspect_err(|e| warn!(error = %e, "ledger append failed"))?;
        state.index.record_post(id, &hashtags);
        if let Some((blob_id, content_type)) = stored_type {
            state.blob_types.entry(blob_id).or_insert(content_type);
        }
        drop(state);

        info!(%id, tags = hashtags.len(), media = has_media, "post created");
        Ok(id)
    }

    /// Every post, newest first.
    pub fn get_all_posts(&self) -> PostResult<Vec<Post>> {
        Ok(self.read_state()?.ledger.list_all())
    }

    pub fn get_post(&self, id: PostId) -> PostResult<Post> {
        let state = self.read_state()?;
        Ok(state.ledger.get(id)?.clone())
    }

    /// Posts carrying `tag`, newest first. `tag` may be in any case and may
    /// carry `#` or punctuation.
    pub fn get_posts_by_hashtag(&self, tag: &str) -> PostResult<Vec<Post>> {
        let state = self.read_state()?;
        let posts = state.index.posts_for_tag(tag, &state.ledger);
        debug!(tag, hits = posts.len(), "hashtag lookup");
        Ok(posts)
    }

    /// Retrieval handle for media recorded on a post.
    pub fn blob_handle(&self, media: &MediaRef) -> BlobHandle {
        self.blobs.handle(media)
    }

    /// Raw bytes of a stored blob.
    pub fn read_blob(&self, id: BlobId) -> PostResult<Bytes> {
        Ok(self.blobs.read(&id)?)
    }

    /// Content type declared by the first post that attached blob `id`, if
    /// any post did.
    pub fn blob_content_type(&self, id: BlobId) -> PostResult<Option<String>> {
        Ok(self.read_state()?.blob_types.get(&id).cloned())
    }

    /// Validation limits this board enforces.
    pub fn limits(&self) -> &ValidationConfig {
        &self.limits
    }

    pub fn stats(&self) -> PostResult<BoardStats> {
        let blob_bytes = self.blobs.stored_bytes()?;
        let state = self.read_state()?;
        Ok(BoardStats {
            posts: state.ledger.len(),
            tags: state.index.len(),
            blob_bytes,
        })
    }

    /// Check ledger invariants and that the index matches a full rebuild.
    pub fn verify(&self) -> PostResult<()> {
        let state = self.read_state()?;
        state.ledger.verify()?;
        if HashtagIndex::rebuild(&state.ledger) != state.index {
            return Err(PostError::StorageFailure(
                "hashtag index diverged from ledger".into(),
            ));
        }
        Ok(())
    }

    fn read_state(&self) -> PostResult<RwLockReadGuard<'_, BoardState>> {
        self.state.read().map_err(|_| poisoned())
    }

    fn write_state(&self) -> PostResult<RwLockWriteGuard<'_, BoardState>> {
        self.state.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> PostError {
    PostError::StorageFailure("board state lock poisoned".into())
}

impl Default for PostService {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for PostService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostService")
            .field("blobs", &self.blobs)
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}
