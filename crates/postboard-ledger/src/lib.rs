//! Append-only post ledger for Postboard.
//!
//! The ledger is the single source of truth for post content and metadata.
//! It provides:
//! - [`PostLedger`], assigning strictly increasing [`PostId`]s from
//!   [`PostId::ORIGIN`] and clamping timestamps to be non-decreasing
//! - newest-first read ordering with a deterministic id tie-break
//! - an optional capacity bound that fails appends without side effects
//! - [`PostLedger::verify`], re-checking every ledger invariant
//!
//! The ledger is a plain data structure; callers decide how access is
//! synchronized (the post service wraps it, together with the hashtag
//! index, in a single lock).
//!
//! [`PostId`]: postboard_types::PostId
//! [`PostId::ORIGIN`]: postboard_types::PostId::ORIGIN

pub mod config;
pub mod error;
pub mod ledger;

pub use config::LedgerConfig;
pub use error::{LedgerError, LedgerResult};
pub use ledger::PostLedger;
