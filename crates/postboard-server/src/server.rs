use std::sync::Arc;

use postboard_service::PostService;
use tokio::net::TcpListener;

use crate::config::PostboardConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// Postboard HTTP server.
pub struct PostboardServer {
    config: PostboardConfig,
    service: Arc<PostService>,
}

impl PostboardServer {
    /// Build the service described by `config`.
    pub fn new(config: PostboardConfig) -> ServerResult<Self> {
        let service = PostService::from_config(&config.service_config())?;
        Ok(Self::with_service(config, Arc::new(service)))
    }

    pub fn with_service(config: PostboardConfig, service: Arc<PostService>) -> Self {
        Self { config, service }
    }

    pub fn config(&self) -> &PostboardConfig {
        &self.config
    }

    pub fn service(&self) -> &Arc<PostService> {
        &self.service
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.service))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(self.config.server.bind_addr).await?;
        tracing::info!(
            addr = %self.config.server.bind_addr,
            public = %self.config.server.public_base_url,
            "postboard listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
