pub mod articles;
pub mod images;
pub mod layouts;

use axum::Json;
use axum::response::IntoResponse;
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}
