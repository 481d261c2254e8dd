use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use postboard_service::PostError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Post(#[from] PostError),

    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request body refused by the extractor before reaching a handler.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Map a service error raised on a read path. Storage faults on reads
    /// are server errors rather than exhausted storage.
    pub fn from_read(err: PostError) -> Self {
        match err {
            PostError::StorageFailure(message) => Self::Internal(message),
            other => Self::Post(other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Post(err) => match err {
                PostError::EmptyPost | PostError::ContentTooLong { .. } => StatusCode::BAD_REQUEST,
                PostError::MediaTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                PostError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                PostError::NotFound(_) | PostError::BlobNotFound(_) => StatusCode::NOT_FOUND,
                PostError::StorageFailure(_) => StatusCode::INSUFFICIENT_STORAGE,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Rejected { status, .. } => *status,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Post(err) => err.kind(),
            Self::BadRequest(_) => "bad_request",
            // Only a body holding oversized inline media can pass the limit.
            Self::Rejected { status, .. } if *status == StatusCode::PAYLOAD_TOO_LARGE => {
                "media_too_large"
            }
            Self::Rejected { .. } => "bad_request",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use postboard_types::PostId;

    #[test]
    fn status_codes() {
        let cases = [
            (PostError::EmptyPost, 400),
            (PostError::ContentTooLong { length: 5001, max: 5000 }, 400),
            (PostError::MediaTooLarge { size: 2, max: 1 }, 413),
            (PostError::UnsupportedMediaType("audio/ogg".into()), 415),
            (PostError::NotFound(PostId::new(4)), 404),
            (PostError::StorageFailure("disk full".into()), 507),
        ];
        for (err, code) in cases {
            assert_eq!(ServerError::from(err).status().as_u16(), code);
        }
    }

    #[test]
    fn read_storage_failure_is_internal() {
        let err = ServerError::from_read(PostError::StorageFailure("poisoned".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err = ServerError::from_read(PostError::NotFound(PostId::new(1)));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
