//! Persistence for articles and categories.
//!
//! The pipeline only talks to the [`ArticleStore`] trait. The Postgres
//! implementation backs the binary; the in-memory implementation backs
//! tests.

pub mod memory;
pub mod postgres;

pub use memory::MemoryArticleStore;
pub use postgres::PgArticleStore;

use crate::entities::{Article, Category};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistable fields of an article. [`ArticleStore::update_fields`] writes
/// only the named subset, so each pipeline stage can commit exactly what it
/// computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleField {
    Title,
    Summary,
    TranslatedSummary,
    ReadingTime,
}

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Insert a new article. Fails if the URL already exists.
    async fn create_article(&self, url: &str, title: Option<&str>) -> Result<Article>;

    async fn article_by_id(&self, id: Uuid) -> Result<Option<Article>>;

    async fn article_by_url(&self, url: &str) -> Result<Option<Article>>;

    /// Persist the named fields of `article` and bump `updated_at`.
    async fn update_fields(&self, article: &Article, fields: &[ArticleField]) -> Result<()>;

    /// Fetch-or-insert a category by name, deriving its slug. Safe against
    /// concurrent callers: the insert is idempotent on the name's unique
    /// constraint.
    async fn get_or_create_category(&self, name: &str) -> Result<Category>;

    /// Categories whose names match, returned in the order of `names`;
    /// unknown names are omitted.
    async fn categories_by_names(&self, names: &[String]) -> Result<Vec<Category>>;

    async fn categories_for_article(&self, article_id: Uuid) -> Result<Vec<Category>>;

    /// Replace the article's category set wholesale: clear, then add.
    /// An empty `category_ids` just clears.
    async fn replace_article_categories(
        &self,
        article_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<()>;
}
