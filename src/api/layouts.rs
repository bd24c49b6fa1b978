//! Layout endpoints: compile an element batch, persist it, hand back the
//! generated markup (JSON) or a downloadable archive.

use crate::archive::{bundle_layout, download_stem};
use crate::error::{Result, ServiceError};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use pagesmith_core::LayoutRecord;
use pagesmith_markup::{CompiledLayout, Element, compile};
use serde_json::{Value, json};
use std::time::Duration;
use uuid::Uuid;

/// Validate the request shape and compile. A missing or non-array
/// `elements` is the one hard failure; individual element anomalies were
/// already defaulted during deserialization.
fn compile_and_store(state: &AppState, body: &Value) -> Result<LayoutRecord> {
    let raw_elements = body
        .get("elements")
        .and_then(Value::as_array)
        .ok_or_else(|| ServiceError::InvalidRequest("Elements array is required".to_string()))?;

    let name = body
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or("my_layout")
        .to_string();

    let elements: Vec<Element> = raw_elements.iter().map(Element::from_value_lenient).collect();
    let compiled = compile(&elements, &state.compile_options());

    let record = LayoutRecord::new(
        name,
        Value::Array(raw_elements.clone()),
        compiled.html,
        compiled.css,
    );
    state.layouts.insert(record.clone())?;

    tracing::info!(
        "layout '{}' compiled: {} elements, {} bytes of markup",
        record.name,
        raw_elements.len(),
        record.generated_html.len(),
    );
    Ok(record)
}

pub async fn create_layout(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse> {
    let record = compile_and_store(&state, &body)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": {
                "id": record.id,
                "name": record.name,
                "html": record.generated_html,
                "css": record.generated_css,
            }
        })),
    ))
}

pub async fn export_layout(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse> {
    let record = compile_and_store(&state, &body)?;
    let layout = CompiledLayout {
        html: record.generated_html.clone(),
        css: record.generated_css.clone(),
    };
    let bytes = bundle_layout(&layout, &record.name)?;

    let disposition = format!("attachment; filename=\"{}.zip\"", download_stem(&record.name));
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

pub async fn get_layout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let cache_key = format!("layout:{}", id);
    if let Some(cached) = state.cache.get(&cache_key) {
        if let Ok(payload) = serde_json::from_str::<Value>(&cached) {
            return Ok(Json(payload));
        }
    }

    let record = state
        .layouts
        .get(id)?
        .ok_or(ServiceError::NotFound("Layout"))?;

    let payload = json!({"status": "success", "data": record});
    state.cache.set(
        &cache_key,
        payload.to_string(),
        Duration::from_secs(state.config.cache.layout_ttl_secs),
    );
    Ok(Json(payload))
}
