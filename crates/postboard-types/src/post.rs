use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::id::PostId;
use crate::media::MediaRef;
use crate::temporal::Timestamp;

/// An immutable ledger record: text, optional media, identity and time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub content: String,
    /// Normalized tags, deduplicated, in first-occurrence order.
    pub hashtags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,
    pub timestamp: Timestamp,
}

impl Post {
    /// Presentation order: newest first, ties broken by higher id first.
    pub fn newest_first(a: &Post, b: &Post) -> Ordering {
        b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.hashtags.iter().any(|t| t == tag)
    }
}

/// Sort posts into presentation order (see [`Post::newest_first`]).
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(Post::newest_first);
}
