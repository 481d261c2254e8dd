//! HTTP server for Postboard.
//!
//! Exposes the post service as a small JSON API:
//!
//! | Route | Operation |
//! |---|---|
//! | `GET /v1/health` | liveness |
//! | `POST /v1/posts` | create a post |
//! | `GET /v1/posts` | all posts, newest first |
//! | `GET /v1/posts/:id` | one post |
//! | `GET /v1/hashtags/:tag/posts` | posts carrying a tag |
//! | `GET /v1/blobs/:blob_id` | stored media bytes |
//! | `GET /v1/stats` | board counters |

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod wire;

pub use config::{PostboardConfig, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::PostboardServer;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use postboard_service::{PostService, ServiceConfig};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn app() -> Router {
        router::build_router(Arc::new(PostService::in_memory()))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn post_json(app: &Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/posts")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body) = send(app, request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (status, body) = get_json(&app(), "/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn create_then_read_back() {
        let app = app();
        let (status, created) = post_json(&app, json!({ "content": "hello #World" })).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_u64().unwrap();
        assert_eq!(id, 1);

        let (status, post) = get_json(&app, &format!("/v1/posts/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(post["content"], "hello #World");
        assert_eq!(post["hashtags"], json!(["world"]));
        assert!(post.get("media").is_none());

        let (_, all) = get_json(&app, "/v1/posts").await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let app = app();
        for content in ["one", "two", "three"] {
            post_json(&app, json!({ "content": content })).await;
        }
        let (_, all) = get_json(&app, "/v1/posts").await;
        let ids: Vec<u64> = all
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn hashtag_route_normalizes_tag() {
        let app = app();
        post_json(&app, json!({ "content": "live set", "hashtags": "#Music" })).await;
        post_json(&app, json!({ "content": "other" })).await;

        for tag in ["music", "MUSIC", "%23Music"] {
            let (status, posts) = get_json(&app, &format!("/v1/hashtags/{tag}/posts")).await;
            assert_eq!(status, StatusCode::OK);
            let posts = posts.as_array().unwrap();
            assert_eq!(posts.len(), 1, "tag {tag}");
            assert_eq!(posts[0]["hashtags"], json!(["music"]));
        }
        let (_, none) = get_json(&app, "/v1/hashtags/jazz/posts").await;
        assert!(none.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn validation_errors_map_to_status_codes() {
        let app = app();
        let (status, body) = post_json(&app, json!({ "content": "   " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "empty_post");

        let (status, body) = post_json(&app, json!({ "content": "x".repeat(5001) })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "content_too_long");

        let (status, body) = post_json(
            &app,
            json!({ "content": "big", "media": {
                "content_type": "video/mp4",
                "url": "https://cdn.example/big.mp4",
                "size": 50 * 1024 * 1024 + 1
            }}),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "media_too_large");

        let (status, body) = post_json(
            &app,
            json!({ "content": "song", "media": { "content_type": "audio/mpeg", "data_hex": "0102" }}),
        )
        .await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"], "unsupported_media_type");

        let (_, all) = get_json(&app, "/v1/posts").await;
        assert!(all.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn storage_failure_is_507() {
        let config = ServiceConfig {
            ledger: postboard_service::config::LedgerConfig { max_posts: Some(0) },
            ..Default::default()
        };
        let service = PostService::from_config(&config).unwrap();
        let app = router::build_router(Arc::new(service));
        let (status, body) = post_json(&app, json!({ "content": "no room" })).await;
        assert_eq!(status, StatusCode::INSUFFICIENT_STORAGE);
        assert_eq!(body["error"], "storage_failure");
    }

    #[tokio::test]
    async fn unknown_post_is_404() {
        let (status, body) = get_json(&app(), "/v1/posts/42").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn uploaded_media_is_downloadable() {
        let app = app();
        let (status, created) = post_json(
            &app,
            json!({ "content": "pic", "media": { "content_type": "image/png", "data_hex": "89504e47" }}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, post) = get_json(&app, &format!("/v1/posts/{}", created["id"])).await;
        assert_eq!(post["media"]["kind"], "image");
        assert_eq!(post["media"]["size"], 4);
        let url = post["media"]["url"].as_str().unwrap();
        let path = &url[url.find("/v1/blobs/").unwrap()..];

        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "image/png");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], &[0x89, 0x50, 0x4e, 0x47]);
    }

    #[tokio::test]
    async fn multi_megabyte_inline_upload_is_accepted() {
        let app = app();
        let media = vec![0x5au8; 3 * 1024 * 1024];
        let (status, created) = post_json(
            &app,
            json!({ "content": "wallpaper", "media": {
                "content_type": "image/png",
                "data_hex": hex::encode(&media)
            }}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, post) = get_json(&app, &format!("/v1/posts/{}", created["id"])).await;
        assert_eq!(post["media"]["size"], 3 * 1024 * 1024);
        let (_, stats) = get_json(&app, "/v1/stats").await;
        assert_eq!(stats["blob_bytes"], 3 * 1024 * 1024);
    }

    #[tokio::test]
    async fn oversized_request_body_gets_json_413() {
        let config = ServiceConfig {
            validation: postboard_service::config::ValidationConfig {
                max_content_chars: 10,
                max_media_bytes: 16,
            },
            ..Default::default()
        };
        let service = PostService::from_config(&config).unwrap();
        let app = router::build_router(Arc::new(service));
        let limit = router::request_body_limit(&config.validation);

        let (status, body) = post_json(
            &app,
            json!({ "content": "pic", "media": {
                "content_type": "image/png",
                "data_hex": hex::encode(vec![1u8; limit])
            }}),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "media_too_large");

        let (status, body) = post_json(
            &app,
            json!({ "content": "pic", "media": {
                "content_type": "image/png",
                "data_hex": hex::encode([1u8; 17])
            }}),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "media_too_large");

        let (_, all) = get_json(&app, "/v1/posts").await;
        assert!(all.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_json_gets_error_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/posts")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app(), request).await;
        assert!(status.is_client_error());
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn external_media_url_passes_through() {
        let app = app();
        let (_, created) = post_json(
            &app,
            json!({ "content": "clip", "media": {
                "content_type": "video/mp4",
                "url": "https://cdn.example/clip.mp4"
            }}),
        )
        .await;
        let (_, post) = get_json(&app, &format!("/v1/posts/{}", created["id"])).await;
        assert_eq!(post["media"]["url"], "https://cdn.example/clip.mp4");
    }

    #[tokio::test]
    async fn unknown_or_malformed_blob_ids() {
        let app = app();
        let missing = "ab".repeat(32);
        let (status, body) = get_json(&app, &format!("/v1/blobs/{missing}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "blob_not_found");

        let (status, _) = get_json(&app, "/v1/blobs/not-hex").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn stats_endpoint() {
        let app = app();
        post_json(&app, json!({ "content": "#a #b" })).await;
        let (status, stats) = get_json(&app, "/v1/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats, json!({ "posts": 1, "tags": 2, "blob_bytes": 0 }));
    }
}
