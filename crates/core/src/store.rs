//! Storage collaborator traits and their in-memory implementations.
//!
//! Persistence is an opaque put/get seam: the only invariant the stores
//! enforce is slug uniqueness at article creation, everything else is a
//! passthrough. The in-memory implementations back tests and single-node
//! deployments; a database-backed implementation would fulfill the same
//! traits.

use crate::entity::{ArticleRecord, LayoutRecord};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Duplicate slug: {0}")]
    DuplicateSlug(String),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

pub trait LayoutStore: Send + Sync {
    fn insert(&self, record: LayoutRecord) -> Result<(), StoreError>;

    fn get(&self, id: Uuid) -> Result<Option<LayoutRecord>, StoreError>;
}

pub trait ArticleStore: Send + Sync {
    /// Insert a new article. Fails on slug collision; callers resolve
    /// collisions up front via [`crate::slug::assign_unique_slug`].
    fn insert(&self, record: ArticleRecord) -> Result<(), StoreError>;

    fn find_by_slug(&self, slug: &str) -> Result<Option<ArticleRecord>, StoreError>;

    fn slug_exists(&self, slug: &str) -> bool;

    /// Published articles, newest first.
    fn list_published(&self) -> Result<Vec<ArticleRecord>, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryLayoutStore {
    entries: RwLock<HashMap<Uuid, LayoutRecord>>,
}

impl InMemoryLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutStore for InMemoryLayoutStore {
    fn insert(&self, record: LayoutRecord) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        entries.insert(record.id, record);
        Ok(())
    }

    fn get(&self, id: Uuid) -> Result<Option<LayoutRecord>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(entries.get(&id).cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryArticleStore {
    entries: RwLock<HashMap<String, ArticleRecord>>,
}

impl InMemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArticleStore for InMemoryArticleStore {
    fn insert(&self, record: ArticleRecord) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        if entries.contains_key(&record.slug) {
            return Err(StoreError::DuplicateSlug(record.slug));
        }
        entries.insert(record.slug.clone(), record);
        Ok(())
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<ArticleRecord>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(entries.get(slug).cloned())
    }

    fn slug_exists(&self, slug: &str) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(slug))
            .unwrap_or(false)
    }

    fn list_published(&self) -> Result<Vec<ArticleRecord>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let mut published: Vec<ArticleRecord> = entries
            .values()
            .filter(|article| article.is_published)
            .cloned()
            .collect();
        published.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pagesmith_style::StyleMap;

    fn article(slug: &str, published: bool) -> ArticleRecord {
        ArticleRecord {
            id: Uuid::new_v4(),
            title: slug.to_string(),
            content: "<p>body</p>".to_string(),
            slug: slug.to_string(),
            is_published: published,
            published_at: published.then(Utc::now),
            styles: StyleMap::new(),
            layout: None,
            meta_title: None,
            meta_description: None,
            keywords: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn layouts_round_trip_by_id() {
        let store = InMemoryLayoutStore::new();
        let record = LayoutRecord::new(
            "home".to_string(),
            serde_json::json!([]),
            "<div></div>".to_string(),
            ".canvas {}".to_string(),
        );
        let id = record.id;
        store.insert(record).unwrap();

        let fetched = store.get(id).unwrap().unwrap();
        assert_eq!(fetched.name, "home");
        assert!(store.get(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        let store = InMemoryArticleStore::new();
        store.insert(article("first", true)).unwrap();
        assert!(store.slug_exists("first"));
        assert!(matches!(
            store.insert(article("first", true)),
            Err(StoreError::DuplicateSlug(_))
        ));
    }

    #[test]
    fn listing_returns_only_published_articles() {
        let store = InMemoryArticleStore::new();
        store.insert(article("live", true)).unwrap();
        store.insert(article("draft", false)).unwrap();

        let published = store.list_published().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].slug, "live");
    }
}
