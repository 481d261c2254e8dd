use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json};
use postboard_service::{BlobId, BoardStats, PostId, PostService};
use serde_json::json;

use crate::error::{ServerError, ServerResult};
use crate::wire::{CreatePostRequest, CreatedResponse, PostView};

pub type AppState = Arc<PostService>;

/// Run a blocking service call off the async workers.
async fn blocking<T, F>(f: F) -> ServerResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> ServerResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "name": "postboard",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn create_post_handler(
    State(service): State<AppState>,
    request: Result<Json<CreatePostRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<CreatedResponse>)> {
    let Json(request) = request?;
    let draft = request.into_draft()?;
    let id = blocking(move || Ok(service.create_post(draft)?)).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn list_posts_handler(
    State(service): State<AppState>,
) -> ServerResult<Json<Vec<PostView>>> {
    let posts = service.get_all_posts().map_err(ServerError::from_read)?;
    Ok(Json(PostView::render_all(posts, &service)))
}

pub async fn get_post_handler(
    State(service): State<AppState>,
    Path(id): Path<u64>,
) -> ServerResult<Json<PostView>> {
    let post = service
        .get_post(PostId::new(id))
        .map_err(ServerError::from_read)?;
    Ok(Json(PostView::render(post, &service)))
}

pub async fn posts_by_tag_handler(
    State(service): State<AppState>,
    Path(tag): Path<String>,
) -> ServerResult<Json<Vec<PostView>>> {
    let posts = service
        .get_posts_by_hashtag(&tag)
        .map_err(ServerError::from_read)?;
    Ok(Json(PostView::render_all(posts, &service)))
}

pub async fn get_blob_handler(
    State(service): State<AppState>,
    Path(blob_id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    let id = BlobId::from_hex(&blob_id).map_err(|e| ServerError::BadRequest(e.to_string()))?;
    let (bytes, content_type) = blocking(move || {
        let bytes = service.read_blob(id).map_err(ServerError::from_read)?;
        let content_type = service
            .blob_content_type(id)
            .map_err(ServerError::from_read)?;
        Ok((bytes, content_type))
    })
    .await?;
    let content_type = content_type
        .and_then(|ct| HeaderValue::from_str(&ct).ok())
        .unwrap_or(HeaderValue::from_static("application/octet-stream"));
    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}

pub async fn stats_handler(State(service): State<AppState>) -> ServerResult<Json<BoardStats>> {
    Ok(Json(service.stats().map_err(ServerError::from_read)?))
}
