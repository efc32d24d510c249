//! Stage sequencing and partial-save policy.
//!
//! Stages run in a fixed order — load, title backfill, reading time,
//! credential check, summarize, categorize, translate, final save — and
//! every stage persists its contribution before the next one gets a chance
//! to fail. Only a missing URL or a failed load aborts with nothing
//! written; re-fetching a URL is the expensive part, so an idempotent
//! re-run must never lose fields that were already computed.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::completion::CompletionService;
use crate::entities::Article;
use crate::loader::ContentLoader;
use crate::store::{ArticleField, ArticleStore};

use super::categorizer::{Categorizer, Vocabulary};
use super::reading_time;
use super::report::{EnrichmentError, RunReport};
use super::summarizer::Summarizer;
use super::translator::Translator;

pub struct EnrichmentPipeline {
    store: Arc<dyn ArticleStore>,
    loader: Arc<dyn ContentLoader>,
    completion: Arc<dyn CompletionService>,
    summarizer: Summarizer,
    translator: Translator,
    categorizer: Categorizer,
}

impl EnrichmentPipeline {
    pub fn new(
        store: Arc<dyn ArticleStore>,
        loader: Arc<dyn ContentLoader>,
        completion: Arc<dyn CompletionService>,
        vocabulary: Vocabulary,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            summarizer: Summarizer::new(completion.clone()),
            translator: Translator::new(completion.clone(), target_language),
            categorizer: Categorizer::new(completion.clone(), store.clone(), vocabulary),
            store,
            loader,
            completion,
        }
    }

    /// Run the full enrichment over one article, mutating it in place and
    /// persisting per stage. The outer `Result` carries store failures
    /// only; every content-level outcome is in the report.
    #[instrument(skip_all, fields(url = %article.url))]
    pub async fn run(&self, article: &mut Article) -> anyhow::Result<RunReport> {
        if article.url.trim().is_empty() {
            return Ok(RunReport::Failed(EnrichmentError::MissingUrl));
        }

        // Stage 1: load. The only stage whose failure leaves the record
        // completely untouched.
        let document = match self.loader.load(&article.url).await {
            Ok(document) => document,
            Err(e) => {
                warn!(error = %e, "content load failed");
                return Ok(RunReport::Failed(EnrichmentError::Fetch(e.to_string())));
            }
        };

        // Stage 2: title backfill — never overwrite an existing title.
        if article.title.as_deref().is_none_or(|t| t.trim().is_empty())
            && let Some(title) = &document.title
        {
            article.title = Some(title.clone());
        }

        // Stage 3: reading time, from the full text only.
        article.reading_time_minutes = reading_time::estimate(&document.text).map(|m| m as i32);

        // Stage 4: without a configured completion service, keep what we
        // have and stop here.
        if !self.completion.is_configured() {
            self.store
                .update_fields(article, &[ArticleField::Title, ArticleField::ReadingTime])
                .await?;
            return Ok(RunReport::Failed(EnrichmentError::ServiceUnavailable));
        }

        // Stage 5: summarize.
        let summary = match self.summarizer.summarize(&document.text).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "summarization failed");
                String::new()
            }
        };

        if summary.is_empty() {
            article.summary.clear();
            article.translated_summary.clear();
            self.store
                .update_fields(
                    article,
                    &[
                        ArticleField::Title,
                        ArticleField::Summary,
                        ArticleField::TranslatedSummary,
                        ArticleField::ReadingTime,
                    ],
                )
                .await?;
            return Ok(RunReport::Failed(EnrichmentError::EmptySummary));
        }

        article.summary = summary;

        // Stage 6: categorize. Persists its own associations; never fatal.
        let categorization = self
            .categorizer
            .categorize(article.id, &article.summary)
            .await?;
        info!(status = ?categorization, "categorization finished");

        // Stage 7: translate, and make the result durable immediately.
        let translation = self.translator.translate(&article.summary).await;
        article.translated_summary = translation.text().to_string();
        self.store
            .update_fields(article, &[ArticleField::TranslatedSummary])
            .await?;

        // Stage 8: final save of the whole derived field set. Category
        // associations were already persisted by the categorizer.
        self.store
            .update_fields(
                article,
                &[
                    ArticleField::Title,
                    ArticleField::Summary,
                    ArticleField::TranslatedSummary,
                    ArticleField::ReadingTime,
                ],
            )
            .await?;

        Ok(RunReport::Completed {
            translation,
            categorization,
        })
    }
}
