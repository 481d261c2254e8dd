use serde::{Deserialize, Serialize};

/// Ledger configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Maximum number of posts the ledger accepts. `None` means unbounded.
    pub max_posts: Option<usize>,
}
