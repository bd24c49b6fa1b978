//! Service configuration: `config/default.toml` layered under
//! `PAGESMITH__`-prefixed environment variables. Every field has a serde
//! default so the service also runs with no config file at all.

use pagesmith_style::StyleDefaults;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub generator: GeneratorConfig,
    pub storage: StorageConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_size_mb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 2000,
            max_upload_size_mb: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Public base URL used to absolutize relative image references in
    /// exported pages and upload responses.
    pub base_url: String,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub submit_label: String,
    pub style_defaults: StyleDefaults,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:2000".to_string(),
            canvas_width: 1440.0,
            canvas_height: 900.0,
            submit_label: "Submit".to_string(),
            style_defaults: StyleDefaults::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { upload_dir: PathBuf::from("uploads/images") }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub layout_ttl_secs: u64,
    pub article_list_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { layout_ttl_secs: 300, article_list_ttl_secs: 60 }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Ok(config_path) = std::env::var("PAGESMITH_CONFIG") {
            if !config_path.is_empty() {
                builder = builder.add_source(config::File::with_name(&config_path));
            }
        } else {
            builder =
                builder.add_source(config::File::with_name("config/default").required(false));
        }

        builder = builder.add_source(config::Environment::with_prefix("PAGESMITH").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// MIME types accepted by the image upload endpoint.
    pub fn allowed_image_types() -> &'static [&'static str] {
        &["image/jpeg", "image/jpg", "image/png", "image/gif", "image/webp"]
    }
}
