//! Article endpoints: publish rich-text content as a downloadable
//! word-processing document, plus read access to the persisted records.

use crate::error::{Result, ServiceError};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use chrono::Utc;
use pagesmith_core::{ArticleRecord, assign_unique_slug};
use pagesmith_doc::DocumentModel;
use pagesmith_richtext::sanitize_html;
use pagesmith_style::StyleMap;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

const ARTICLE_LIST_CACHE_KEY: &str = "articles:published";

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    pub styles: StyleMap,
    pub layout: Option<Uuid>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub keywords: Vec<String>,
}

impl Default for CreateArticleRequest {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            styles: StyleMap::new(),
            layout: None,
            meta_title: None,
            meta_description: None,
            keywords: Vec::new(),
        }
    }
}

pub async fn create_article(
    State(state): State<AppState>,
    Json(req): Json<CreateArticleRequest>,
) -> Result<impl IntoResponse> {
    if req.title.trim().is_empty() || req.content.trim().is_empty() {
        return Err(ServiceError::InvalidRequest(
            "Title and content are required".to_string(),
        ));
    }

    let slug = assign_unique_slug(&req.title, |candidate| state.articles.slug_exists(candidate));

    // The raw content feeds the compiler; the sanitized form is what gets
    // persisted.
    let paragraphs = pagesmith_richtext::compile(
        &req.content,
        &req.styles,
        &state.config.generator.style_defaults,
    );
    let document = DocumentModel {
        title: req.title.trim().to_string(),
        paragraphs,
    };
    let bytes = state.renderer.render(&document)?;

    let record = ArticleRecord {
        id: Uuid::new_v4(),
        title: sanitize_html(req.title.trim()),
        content: sanitize_html(&req.content),
        slug: slug.clone(),
        is_published: true,
        published_at: Some(Utc::now()),
        styles: req.styles,
        layout: req.layout,
        meta_title: req.meta_title,
        meta_description: req.meta_description,
        keywords: req.keywords,
        created_at: Utc::now(),
    };
    state.articles.insert(record)?;
    state.cache.del(ARTICLE_LIST_CACHE_KEY);

    tracing::info!("article '{}' published ({} bytes)", slug, bytes.len());

    let disposition = format!(
        "attachment; filename=\"{}.{}\"",
        slug,
        state.renderer.file_extension()
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, state.renderer.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

pub async fn list_articles(State(state): State<AppState>) -> Result<impl IntoResponse> {
    if let Some(cached) = state.cache.get(ARTICLE_LIST_CACHE_KEY) {
        if let Ok(payload) = serde_json::from_str::<serde_json::Value>(&cached) {
            return Ok(Json(payload));
        }
    }

    let articles = state.articles.list_published()?;
    let payload = json!({
        "status": "success",
        "results": articles.len(),
        "data": articles,
    });
    state.cache.set(
        ARTICLE_LIST_CACHE_KEY,
        payload.to_string(),
        Duration::from_secs(state.config.cache.article_list_ttl_secs),
    );
    Ok(Json(payload))
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let article = state
        .articles
        .find_by_slug(&slug)?
        .ok_or(ServiceError::NotFound("Article"))?;
    Ok(Json(json!({"status": "success", "data": article})))
}
