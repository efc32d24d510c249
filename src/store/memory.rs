use crate::entities::{Article, Category, slugify};
use crate::store::{ArticleField, ArticleStore};
use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    articles: HashMap<Uuid, Article>,
    /// Kept as a Vec so lookups preserve creation order.
    categories: Vec<Category>,
    links: HashMap<Uuid, HashSet<Uuid>>,
}

/// In-memory [`ArticleStore`] with the same observable behavior as the
/// Postgres implementation. Used by the pipeline integration tests.
#[derive(Default)]
pub struct MemoryArticleStore {
    inner: RwLock<Inner>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn create_article(&self, url: &str, title: Option<&str>) -> Result<Article> {
        let mut inner = self.inner.write().await;
        if inner.articles.values().any(|a| a.url == url) {
            bail!("article with url '{url}' already exists");
        }
        let now = Utc::now();
        let article = Article {
            id: Uuid::new_v4(),
            url: url.to_string(),
            title: title.map(str::to_string),
            summary: String::new(),
            translated_summary: String::new(),
            reading_time_minutes: None,
            created_at: now,
            updated_at: now,
        };
        inner.articles.insert(article.id, article.clone());
        Ok(article)
    }

    async fn article_by_id(&self, id: Uuid) -> Result<Option<Article>> {
        let inner = self.inner.read().await;
        Ok(inner.articles.get(&id).cloned())
    }

    async fn article_by_url(&self, url: &str) -> Result<Option<Article>> {
        let inner = self.inner.read().await;
        Ok(inner.articles.values().find(|a| a.url == url).cloned())
    }

    async fn update_fields(&self, article: &Article, fields: &[ArticleField]) -> Result<()> {
        let mut inner = self.inner.write().await;
        let Some(stored) = inner.articles.get_mut(&article.id) else {
            bail!("article {} not found", article.id);
        };
        for field in fields {
            match field {
                ArticleField::Title => stored.title = article.title.clone(),
                ArticleField::Summary => stored.summary = article.summary.clone(),
                ArticleField::TranslatedSummary => {
                    stored.translated_summary = article.translated_summary.clone()
                }
                ArticleField::ReadingTime => {
                    stored.reading_time_minutes = article.reading_time_minutes
                }
            }
        }
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn get_or_create_category(&self, name: &str) -> Result<Category> {
        let mut inner = self.inner.write().await;
        if let Some(existing) = inner.categories.iter().find(|c| c.name == name) {
            return Ok(existing.clone());
        }
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slugify(name),
        };
        inner.categories.push(category.clone());
        Ok(category)
    }

    async fn categories_by_names(&self, names: &[String]) -> Result<Vec<Category>> {
        let inner = self.inner.read().await;
        Ok(names
            .iter()
            .filter_map(|name| inner.categories.iter().find(|c| &c.name == name))
            .cloned()
            .collect())
    }

    async fn categories_for_article(&self, article_id: Uuid) -> Result<Vec<Category>> {
        let inner = self.inner.read().await;
        let Some(ids) = inner.links.get(&article_id) else {
            return Ok(Vec::new());
        };
        let mut categories: Vec<Category> = inner
            .categories
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn replace_article_categories(
        &self,
        article_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner
            .links
            .insert(article_id, category_ids.iter().copied().collect());
        Ok(())
    }
}
