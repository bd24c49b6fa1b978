//! The pagesmith service: HTTP surface over the layout and rich-text
//! compilers.
//!
//! Handlers are thin adapters: validate the request shape, call the
//! compilers, call the collaborators (stores, cache, blob storage, document
//! renderer, archiver), map errors to statuses. All compilation is
//! synchronous and request-scoped; nothing is shared between requests
//! beyond the immutable configuration and the collaborator handles.

pub mod api;
pub mod archive;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use state::AppState;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let upload_dir = state.config.storage.upload_dir.clone();
    let body_limit = state.config.server.max_upload_size_mb * 1024 * 1024;

    Router::new()
        // Health check
        .route("/health", get(api::health_check))
        // Layouts
        .route("/api/v1/layouts", post(api::layouts::create_layout))
        .route("/api/v1/layouts/export", post(api::layouts::export_layout))
        .route("/api/v1/layouts/:id", get(api::layouts::get_layout))
        // Articles
        .route(
            "/api/v1/articles",
            post(api::articles::create_article).get(api::articles::list_articles),
        )
        .route("/api/v1/articles/:slug", get(api::articles::get_article))
        // Image uploads + static serving of stored files
        .route("/api/v1/images", post(api::images::upload_image))
        .nest_service("/images", ServeDir::new(upload_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
