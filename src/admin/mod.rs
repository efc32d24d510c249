//! Bulk "process selected articles" trigger: run the pipeline over a
//! selection sequentially and aggregate the outcomes for display.

use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::enrich::EnrichmentPipeline;
use crate::store::ArticleStore;

/// Aggregate result of one bulk run.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    pub success_count: usize,
    /// One `"<url>: <detail>"` line per failed article.
    pub errors: Vec<String>,
}

impl BulkOutcome {
    pub fn summary_message(&self) -> String {
        format!("Successfully summarized {} article(s).", self.success_count)
    }

    pub fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(format!("Errors encountered:\n{}", self.errors.join("\n")))
    }
}

/// Process the selected articles one at a time, in order. Per-article
/// failures (including store errors) are collected, never propagated, so
/// one bad article cannot stop the rest of the selection.
pub async fn process_articles(
    pipeline: &EnrichmentPipeline,
    store: &dyn ArticleStore,
    article_ids: &[Uuid],
) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();

    for id in article_ids {
        let result = process_one(pipeline, store, *id)
            .instrument(info_span!("process_article", article_id = %id))
            .await;
        match result {
            Ok(()) => outcome.success_count += 1,
            Err(line) => outcome.errors.push(line),
        }
    }

    outcome
}

/// Run one article through the pipeline. `Err` carries the display line for
/// the aggregate error report.
async fn process_one(
    pipeline: &EnrichmentPipeline,
    store: &dyn ArticleStore,
    id: Uuid,
) -> Result<(), String> {
    let mut article = match store.article_by_id(id).await {
        Ok(Some(article)) => article,
        Ok(None) => {
            warn!("article not found");
            return Err(format!("{id}: article not found"));
        }
        Err(e) => {
            warn!(error = %e, "failed to load article");
            return Err(format!("{id}: {e}"));
        }
    };

    match pipeline.run(&mut article).await {
        Ok(report) if report.is_error() => Err(format!("{}: {}", article.url, report)),
        Ok(report) => {
            info!(status = %report, "article processed");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "pipeline run failed");
            Err(format!("{}: {}", article.url, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_render_counts_and_errors() {
        let outcome = BulkOutcome {
            success_count: 2,
            errors: vec!["https://a.example/x: Error fetching URL: timeout".to_string()],
        };
        assert_eq!(
            outcome.summary_message(),
            "Successfully summarized 2 article(s)."
        );
        let errors = outcome.error_message().unwrap();
        assert!(errors.starts_with("Errors encountered:\n"));
        assert!(errors.contains("https://a.example/x"));
    }

    #[test]
    fn no_error_message_when_clean() {
        let outcome = BulkOutcome {
            success_count: 1,
            errors: Vec::new(),
        };
        assert_eq!(outcome.error_message(), None);
    }
}
