use crate::entities::{Article, Category, slugify};
use crate::store::{ArticleField, ArticleStore};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const ARTICLE_COLUMNS: &str =
    "id, url, title, summary, translated_summary, reading_time_minutes, created_at, updated_at";

#[derive(Clone)]
pub struct PgArticleStore {
    pool: PgPool,
}

impl PgArticleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn create_article(&self, url: &str, title: Option<&str>) -> Result<Article> {
        let sql = format!(
            "INSERT INTO articles (id, url, title) VALUES ($1, $2, $3) RETURNING {ARTICLE_COLUMNS}"
        );
        let article = sqlx::query_as::<_, Article>(&sql)
            .bind(Uuid::new_v4())
            .bind(url)
            .bind(title)
            .fetch_one(&self.pool)
            .await?;

        Ok(article)
    }

    async fn article_by_id(&self, id: Uuid) -> Result<Option<Article>> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1");
        let article = sqlx::query_as::<_, Article>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(article)
    }

    async fn article_by_url(&self, url: &str) -> Result<Option<Article>> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE url = $1");
        let article = sqlx::query_as::<_, Article>(&sql)
            .bind(url)
            .fetch_optional(&self.pool)
            .await?;

        Ok(article)
    }

    async fn update_fields(&self, article: &Article, fields: &[ArticleField]) -> Result<()> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE articles SET updated_at = now()");
        for field in fields {
            match field {
                ArticleField::Title => {
                    query.push(", title = ").push_bind(article.title.as_deref());
                }
                ArticleField::Summary => {
                    query.push(", summary = ").push_bind(article.summary.as_str());
                }
                ArticleField::TranslatedSummary => {
                    query
                        .push(", translated_summary = ")
                        .push_bind(article.translated_summary.as_str());
                }
                ArticleField::ReadingTime => {
                    query
                        .push(", reading_time_minutes = ")
                        .push_bind(article.reading_time_minutes);
                }
            }
        }
        query.push(" WHERE id = ").push_bind(article.id);
        query.build().execute(&self.pool).await?;

        Ok(())
    }

    async fn get_or_create_category(&self, name: &str) -> Result<Category> {
        // Idempotent under concurrent callers: losers of the insert race
        // fall through to the select.
        sqlx::query("INSERT INTO categories (id, name, slug) VALUES ($1, $2, $3) ON CONFLICT (name) DO NOTHING")
            .bind(Uuid::new_v4())
            .bind(name)
            .bind(slugify(name))
            .execute(&self.pool)
            .await?;

        let category =
            sqlx::query_as::<_, Category>("SELECT id, name, slug FROM categories WHERE name = $1")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(category)
    }

    async fn categories_by_names(&self, names: &[String]) -> Result<Vec<Category>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let found = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug FROM categories WHERE name = ANY($1)",
        )
        .bind(names.to_vec())
        .fetch_all(&self.pool)
        .await?;

        // Preserve the caller's name order
        let mut ordered = Vec::with_capacity(found.len());
        for name in names {
            if let Some(category) = found.iter().find(|c| &c.name == name) {
                ordered.push(category.clone());
            }
        }

        Ok(ordered)
    }

    async fn categories_for_article(&self, article_id: Uuid) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT c.id, c.name, c.slug
             FROM categories c
             JOIN article_categories ac ON ac.category_id = c.id
             WHERE ac.article_id = $1
             ORDER BY c.name",
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn replace_article_categories(
        &self,
        article_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM article_categories WHERE article_id = $1")
            .bind(article_id)
            .execute(&mut *tx)
            .await?;

        for category_id in category_ids {
            sqlx::query(
                "INSERT INTO article_categories (article_id, category_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(article_id)
            .bind(category_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
