use std::collections::BTreeMap;

use postboard_ledger::PostLedger;
use postboard_types::{hashtag, Post, PostId};
use tracing::trace;

/// Inverted index from normalized hashtag to post ids.
///
/// Entries are only ever created or extended; no delete path exists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HashtagIndex {
    entries: BTreeMap<String, Vec<PostId>>,
}

impl HashtagIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the index from every post in `ledger`.
    pub fn rebuild(ledger: &PostLedger) -> Self {
        let mut index = Self::new();
        for post in ledger.iter() {
            index.record_post(post.id, &post.hashtags);
        }
        index
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a freshly appended post under each of its (already
    /// normalized) tags.
    pub fn record_post(&mut self, id: PostId, hashtags: &[String]) {
        for tag in hashtags {
            let ids = self.entries.entry(tag.clone()).or_default();
            if ids.last() != Some(&id) {
                ids.push(id);
            }
        }
        trace!(%id, tags = hashtags.len(), "post indexed");
    }

    /// Post ids carrying `raw_tag`, in creation order.
    ///
    /// The tag is normalized first, so `#Music`, `MUSIC` and `music!` all
    /// hit the same entry. Unknown or unusable tags yield an empty list.
    pub fn lookup(&self, raw_tag: &str) -> Vec<PostId> {
        hashtag::normalize(raw_tag)
            .and_then(|tag| self.entries.get(&tag))
            .cloned()
            .unwrap_or_default()
    }

    /// Posts carrying `raw_tag`, newest first.
    pub fn posts_for_tag(&self, raw_tag: &str, ledger: &PostLedger) -> Vec<Post> {
        ledger.collect(&self.lookup(raw_tag))
    }

    /// Number of posts carrying `raw_tag`.
    pub fn tag_count(&self, raw_tag: &str) -> usize {
        self.lookup(raw_tag).len()
    }

    /// Known tags in lexicographic order.
    pub fn tags(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}
