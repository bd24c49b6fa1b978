//! Image upload endpoint: one multipart `image` field, MIME-allowlisted
//! and size-capped, stored under a generated name.

use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use serde_json::json;

pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::UploadRejected(e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().unwrap_or("").to_string();
        if !Config::allowed_image_types().contains(&content_type.as_str()) {
            return Err(ServiceError::UploadRejected(
                "Only image files are allowed (JPEG, PNG, GIF, WEBP)".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ServiceError::UploadRejected(e.to_string()))?;
        if data.is_empty() {
            return Err(ServiceError::UploadRejected("Uploaded file is empty".to_string()));
        }
        let max_bytes = state.config.server.max_upload_size_mb * 1024 * 1024;
        if data.len() > max_bytes {
            return Err(ServiceError::UploadRejected(format!(
                "File too large. Maximum {}MB allowed",
                state.config.server.max_upload_size_mb
            )));
        }

        let (url, filename) = state
            .uploads
            .store(&data, extension_for(&content_type))
            .await
            .map_err(ServiceError::BlobStorage)?;

        tracing::info!("stored upload '{}' ({} bytes)", filename, data.len());
        return Ok(Json(json!({
            "success": true,
            "imageUrl": url,
            "filename": filename,
        })));
    }

    Err(ServiceError::UploadRejected(
        "No file uploaded or invalid file type".to_string(),
    ))
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    }
}
