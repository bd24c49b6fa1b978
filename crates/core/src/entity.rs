//! The persisted entity records. Both are opaque payloads to everything
//! except the handlers that create them: layouts are inserted fresh on
//! every export and never updated, articles are created once per publish.

use chrono::{DateTime, Utc};
use pagesmith_style::StyleMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecord {
    pub id: Uuid,
    pub name: String,
    /// The raw element batch as submitted, pre-compile.
    pub layout_json: serde_json::Value,
    pub generated_html: String,
    pub generated_css: String,
    pub created_at: DateTime<Utc>,
}

impl LayoutRecord {
    pub fn new(
        name: String,
        layout_json: serde_json::Value,
        generated_html: String,
        generated_css: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            layout_json,
            generated_html,
            generated_css,
            created_at: Utc::now(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    pub id: Uuid,
    pub title: String,
    /// Sanitized HTML.
    pub content: String,
    pub slug: String,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub styles: StyleMap,
    /// Optional reference to the layout this article is published under.
    pub layout: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}
