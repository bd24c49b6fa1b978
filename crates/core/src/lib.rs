//! Integration-level pieces shared by the service handlers: persisted
//! entity records, the storage and cache collaborator traits with their
//! in-memory implementations, and slug assignment.

pub mod cache;
pub mod entity;
pub mod slug;
pub mod store;

pub use cache::{InMemoryCache, ResponseCache};
pub use entity::{ArticleRecord, LayoutRecord};
pub use slug::assign_unique_slug;
pub use store::{
    ArticleStore, InMemoryArticleStore, InMemoryLayoutStore, LayoutStore, StoreError,
};
