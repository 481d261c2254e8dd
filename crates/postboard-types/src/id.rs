use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Ledger-assigned post identifier.
///
/// Identifiers are handed out by the ledger from a counter starting at
/// [`PostId::ORIGIN`]. They are strictly increasing in creation order and
/// never reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(u64);

impl PostId {
    /// The first identifier a fresh ledger assigns.
    pub const ORIGIN: Self = Self(1);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }

    /// The identifier that follows this one, or `None` on overflow.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Debug for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PostId({})", self.0)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| TypeError::InvalidPostId(s.to_string()))
    }
}

impl From<u64> for PostId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Content-addressed blob identifier.
///
/// A `BlobId` is the BLAKE3 hash of the blob bytes, prefixed with a domain
/// tag so blob ids never collide with hashes used for anything else.
/// Identical bytes always produce the same `BlobId`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlobId([u8; 32]);

impl BlobId {
    /// Domain tag mixed into every blob hash.
    pub const DOMAIN: &'static str = "postboard-blob-v1";

    /// A hasher pre-seeded with the blob domain tag.
    ///
    /// Feed it the blob bytes (in as many chunks as convenient) and pass the
    /// result to [`BlobId::from_hasher`].
    pub fn hasher() -> blake3::Hasher {
        let mut hasher = blake3::Hasher::new();
        hasher.update(Self::DOMAIN.as_bytes());
        hasher.update(b":");
        hasher
    }

    /// Finalize a hasher obtained from [`BlobId::hasher`].
    pub fn from_hasher(hasher: &blake3::Hasher) -> Self {
        Self(*hasher.finalize().as_bytes())
    }

    /// Compute the id of a complete byte payload.
    pub fn digest(data: &[u8]) -> Self {
        let mut hasher = Self::hasher();
        hasher.update(data);
        Self::from_hasher(&hasher)
    }

    /// Create a `BlobId` from a pre-computed hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobId({})", self.short_hex())
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for BlobId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
