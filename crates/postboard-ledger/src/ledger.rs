use postboard_types::{hashtag, sort_newest_first, MediaRef, Post, PostId, Timestamp};
use tracing::debug;

use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};

/// The append-only ledger of posts.
///
/// Posts are kept in creation order, which is also ascending id order.
/// Nothing is ever removed or modified once appended.
#[derive(Debug)]
pub struct PostLedger {
    posts: Vec<Post>,
    next_id: PostId,
    config: LedgerConfig,
}

impl PostLedger {
    /// An empty ledger with its counter at [`PostId::ORIGIN`].
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            posts: Vec::new(),
            next_id: PostId::ORIGIN,
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// The identifier the next successful append will receive.
    pub fn next_id(&self) -> PostId {
        self.next_id
    }

    /// Append a post and return its identifier.
    ///
    /// `timestamp` is the server-observed creation time; if it is earlier
    /// than the newest recorded post it is raised to match, so timestamps
    /// never decrease. On error the ledger is left unchanged and no
    /// identifier is consumed.
    pub fn append(
        &mut self,
        content: String,
        hashtags: Vec<String>,
        media: Option<MediaRef>,
        timestamp: Timestamp,
    ) -> LedgerResult<PostId> {
        if let Some(capacity) = self.config.max_posts {
            if self.posts.len() >= capacity {
                return Err(LedgerError::CapacityExhausted { capacity });
            }
        }
        let id = self.next_id;
        let following = id.next().ok_or(LedgerError::IdSpaceExhausted)?;

        let timestamp = match self.posts.last() {
            Some(last) => timestamp.max(last.timestamp),
            None => timestamp,
        };

        self.posts.push(Post {
            id,
            content,
            hashtags,
            media,
            timestamp,
        });
        self.next_id = following;
        debug!(%id, ts = timestamp.as_nanos(), "post appended");
        Ok(id)
    }

    /// Look up a post by identifier.
    pub fn get(&self, id: PostId) -> LedgerResult<&Post> {
        self.posts
            .binary_search_by_key(&id, |p| p.id)
            .map(|index| &self.posts[index])
            .map_err(|_| LedgerError::NotFound(id))
    }

    /// All posts, newest first (ties broken by higher id first).
    pub fn list_all(&self) -> Vec<Post> {
        let mut posts = self.posts.clone();
        sort_newest_first(&mut posts);
        posts
    }

    /// Posts for the given identifiers, newest first. Unknown ids are skipped.
    pub fn collect(&self, ids: &[PostId]) -> Vec<Post> {
        let mut posts: Vec<Post> = ids
            .iter()
            .filter_map(|id| self.get(*id).ok())
            .cloned()
            .collect();
        sort_newest_first(&mut posts);
        posts
    }

    /// Posts in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter()
    }

    /// Re-check every ledger invariant: strictly increasing ids starting at
    /// the origin, non-decreasing timestamps, and hashtags that match what
    /// the content yields.
    pub fn verify(&self) -> LedgerResult<()> {
        let mut previous: Option<&Post> = None;
        for post in &self.posts {
            match previous {
                None if post.id < PostId::ORIGIN => {
                    return Err(violation(post, "identifier below origin"));
                }
                Some(prev) if post.id <= prev.id => {
                    return Err(violation(post, "identifier not strictly increasing"));
                }
                Some(prev) if post.timestamp < prev.timestamp => {
                    return Err(violation(post, "timestamp decreased"));
                }
                _ => {}
            }
            if post.hashtags != hashtag::extract_and_dedupe(&post.content) {
                return Err(violation(post, "hashtags diverge from content"));
            }
            if post.id >= self.next_id {
                return Err(violation(post, "identifier at or beyond counter"));
            }
            previous = Some(post);
        }
        Ok(())
    }
}

impl Default for PostLedger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

fn violation(post: &Post, reason: &str) -> LedgerError {
    LedgerError::IntegrityViolation {
        id: post.id,
        reason: reason.into(),
    }
}
