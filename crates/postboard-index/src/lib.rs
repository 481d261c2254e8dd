//! Hashtag inverted index for Postboard.
//!
//! Maps each normalized tag to the ids of the posts carrying it, in creation
//! order, so filtered reads never scan the whole ledger. The index holds ids
//! only; post data always comes from the ledger.
//!
//! The index is derived state: [`HashtagIndex::rebuild`] recomputes it from
//! a ledger, and an incrementally maintained index must always equal the
//! rebuilt one.

pub mod index;

pub use index::HashtagIndex;
