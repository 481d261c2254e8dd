use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use postboard_service::config::ValidationConfig;
use postboard_service::PostService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler;

/// Slack for JSON framing, field names and the tag field.
const BODY_OVERHEAD: u64 = 64 * 1024;

/// Worst-case JSON escape of one content character (`\uXXXX\uXXXX`).
const MAX_ESCAPED_CHAR_BYTES: u64 = 12;

/// Largest request body a create call can legitimately need.
///
/// Inline media travels hex encoded, so the media cap counts twice. A body
/// past this size cannot hold valid media and is refused before it is
/// buffered.
pub fn request_body_limit(limits: &ValidationConfig) -> usize {
    let media = limits.max_media_bytes.saturating_mul(2);
    let content = (limits.max_content_chars as u64).saturating_mul(MAX_ESCAPED_CHAR_BYTES);
    let total = media.saturating_add(content).saturating_add(BODY_OVERHEAD);
    usize::try_from(total).unwrap_or(usize::MAX)
}

/// Build the axum router with all Postboard endpoints.
pub fn build_router(service: Arc<PostService>) -> Router {
    let body_limit = request_body_limit(service.limits());
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/stats", get(handler::stats_handler))
        .route(
            "/v1/posts",
            get(handler::list_posts_handler).post(handler::create_post_handler),
        )
        .route("/v1/posts/:id", get(handler::get_post_handler))
        .route("/v1/hashtags/:tag/posts", get(handler::posts_by_tag_handler))
        .route("/v1/blobs/:blob_id", get(handler::get_blob_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_limit_covers_hex_encoded_media() {
        let limits = ValidationConfig::default();
        let limit = request_body_limit(&limits) as u64;
        assert!(limit > 2 * limits.max_media_bytes);
        assert!(limit < 2 * limits.max_media_bytes + 1024 * 1024);
    }

    #[test]
    fn body_limit_saturates() {
        let limits = ValidationConfig {
            max_content_chars: usize::MAX,
            max_media_bytes: u64::MAX,
        };
        assert_eq!(request_body_limit(&limits), usize::MAX);
    }
}
