use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use postboard_service::config::{BlobConfig, LedgerConfig, ValidationConfig};
use postboard_service::ServiceConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8787;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Externally visible base URL; stored blob URLs are built from it.
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
            public_base_url: format!("http://127.0.0.1:{DEFAULT_PORT}"),
        }
    }
}

/// Full configuration file: `[server]` plus the service sections
/// (`[validation]`, `[blobs]`, `[ledger]`). Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostboardConfig {
    pub server: ServerConfig,
    pub validation: ValidationConfig,
    pub blobs: BlobConfig,
    pub ledger: LedgerConfig,
}

impl PostboardConfig {
    pub fn from_toml(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    /// Service configuration with blob URLs rooted at the server's public
    /// base URL. `[server] public_base_url` is the only place that URL is
    /// configured.
    pub fn service_config(&self) -> ServiceConfig {
        let mut blobs = self.blobs.clone();
        blobs.public_base_url = self.server.public_base_url.clone();
        ServiceConfig {
            validation: self.validation.clone(),
            blobs,
            ledger: self.ledger.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = PostboardConfig::default();
        assert_eq!(c.server.bind_addr, "127.0.0.1:8787".parse::<SocketAddr>().unwrap());
        assert_eq!(c.validation.max_content_chars, 5000);
        assert!(c.blobs.dir.is_none());
        assert!(c.ledger.max_posts.is_none());
    }

    #[test]
    fn parses_all_sections() {
        let c = PostboardConfig::from_toml(
            r#"
            [server]
            bind_addr = "0.0.0.0:9000"
            public_base_url = "https://board.example"

            [validation]
            max_media_bytes = 1024

            [blobs]
            dir = "/var/lib/postboard/blobs"
            quota_bytes = 1048576

            [ledger]
            max_posts = 100
            "#,
        )
        .unwrap();
        assert_eq!(c.server.bind_addr.port(), 9000);
        assert_eq!(c.validation.max_media_bytes, 1024);
        assert_eq!(c.blobs.quota_bytes, Some(1_048_576));
        assert_eq!(c.ledger.max_posts, Some(100));
        assert_eq!(
            c.service_config().blobs.public_base_url,
            "https://board.example"
        );
    }

    #[test]
    fn blob_urls_follow_server_section() {
        let c = PostboardConfig::from_toml(
            r#"
            [server]
            public_base_url = "https://board.example"

            [blobs]
            public_base_url = "https://ignored.example"
            "#,
        )
        .unwrap();
        assert_eq!(
            c.service_config().blobs.public_base_url,
            "https://board.example"
        );
        let rendered = toml::to_string(&c).unwrap();
        assert_eq!(rendered.matches("public_base_url").count(), 1);
    }

    #[test]
    fn rejects_malformed_file() {
        let err = PostboardConfig::from_toml("[server]\nbind_addr = 12").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("postboard.toml");
        std::fs::write(&path, "[ledger]\nmax_posts = 3\n").unwrap();
        let c = PostboardConfig::load(&path).unwrap();
        assert_eq!(c.ledger.max_posts, Some(3));
        assert!(PostboardConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}
