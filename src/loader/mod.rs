//! The content-loading seam of the pipeline: given a URL, produce extracted
//! article text plus discovered metadata. The pipeline only knows this
//! trait; the production implementation composes the HTTP fetcher and the
//! readability extractor.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::extractor;
use crate::fetcher::{self, FetchError};

/// Extracted page text plus metadata discovered while loading.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Full readable text of the page. Transient: used for reading time and
    /// summarization, never persisted.
    pub text: String,
    /// Title discovered in the page, if any.
    pub title: Option<String>,
    /// Detected language of the text (ISO 639-1 where known).
    pub language: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no readable content could be extracted from {0}")]
    NoContent(String),
}

#[async_trait]
pub trait ContentLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<LoadedDocument, LoadError>;
}

/// Production loader: fetch over HTTP, decode, run readability extraction.
#[derive(Debug, Clone, Default)]
pub struct HttpContentLoader;

impl HttpContentLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContentLoader for HttpContentLoader {
    #[instrument(skip(self), fields(url = %url))]
    async fn load(&self, url: &str) -> Result<LoadedDocument, LoadError> {
        let page = fetcher::fetch(url).await?;
        debug!(
            status = %page.status,
            encoding = page.encoding,
            bytes = page.body.len(),
            "fetched page"
        );

        let document = extractor::extract(&page)
            .ok_or_else(|| LoadError::NoContent(page.url_final.to_string()))?;

        debug!(
            words = document.text.split_whitespace().count(),
            language = document.language.as_deref().unwrap_or("unknown"),
            "extracted readable content"
        );

        let title = Some(document.title).filter(|t| !t.trim().is_empty());

        Ok(LoadedDocument {
            text: document.text,
            title,
            language: document.language,
            fetched_at: document.fetched_at,
        })
    }
}
