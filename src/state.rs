use crate::config::Config;
use crate::storage::{BlobStorage, FilesystemStorage};
use pagesmith_core::{
    ArticleStore, InMemoryArticleStore, InMemoryCache, InMemoryLayoutStore, LayoutStore,
    ResponseCache,
};
use pagesmith_doc::DocumentRenderer;
use pagesmith_markup::CompileOptions;
use pagesmith_render_docx::DocxRenderer;
use pagesmith_types::Size;
use std::sync::Arc;

/// Shared application state: configuration plus the collaborator handles.
/// Everything here is immutable or internally synchronized; handlers never
/// share mutable compiler state.
#[derive(Clone)]
pub struct AppState {
    pub layouts: Arc<dyn LayoutStore>,
    pub articles: Arc<dyn ArticleStore>,
    pub cache: Arc<dyn ResponseCache>,
    pub uploads: Arc<dyn BlobStorage>,
    pub renderer: Arc<dyn DocumentRenderer>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let uploads = FilesystemStorage::new(
            config.storage.upload_dir.clone(),
            format!("{}/images", config.generator.base_url.trim_end_matches('/')),
        )?;

        Ok(Self {
            layouts: Arc::new(InMemoryLayoutStore::new()),
            articles: Arc::new(InMemoryArticleStore::new()),
            cache: Arc::new(InMemoryCache::new()),
            uploads: Arc::new(uploads),
            renderer: Arc::new(DocxRenderer::new()),
            config: Arc::new(config),
        })
    }

    /// Compiler settings derived from configuration, built per request so
    /// config changes need no compiler-side state.
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            base_url: self.config.generator.base_url.clone(),
            canvas: Size::new(
                self.config.generator.canvas_width,
                self.config.generator.canvas_height,
            ),
            submit_label: self.config.generator.submit_label.clone(),
            defaults: self.config.generator.style_defaults.clone(),
        }
    }
}
