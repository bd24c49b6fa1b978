use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Upload rejected: {0}")]
    UploadRejected(String),

    #[error("Storage error: {0}")]
    Store(#[from] pagesmith_core::StoreError),

    #[error("Document rendering failed: {0}")]
    Render(#[from] pagesmith_doc::RenderError),

    #[error("Archive packaging failed: {0}")]
    Archive(String),

    #[error("Blob storage error: {0}")]
    BlobStorage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            Self::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, "InvalidRequest", self.to_string())
            }
            Self::UploadRejected(_) => {
                (StatusCode::BAD_REQUEST, "UploadRejected", self.to_string())
            }
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NotFound", self.to_string()),
            Self::Store(_)
            | Self::Render(_)
            | Self::Archive(_)
            | Self::BlobStorage(_)
            | Self::Internal(_) => {
                tracing::error!("internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": "error",
            "error": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
