pub use postboard_gate::ValidationConfig;
pub use postboard_ledger::LedgerConfig;
pub use postboard_store::BlobConfig;
use serde::{Deserialize, Serialize};

/// Configuration for every component the service owns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub validation: ValidationConfig,
    pub blobs: BlobConfig,
    pub ledger: LedgerConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_parse_independently() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [validation]
            max_content_chars = 140

            [ledger]
            max_posts = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.validation.max_content_chars, 140);
        assert_eq!(config.ledger.max_posts, Some(10));
        assert_eq!(config.blobs, BlobConfig::default());
    }
}
