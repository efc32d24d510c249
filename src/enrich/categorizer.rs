//! Maps a summary onto a fixed vocabulary of category labels via one
//! completion call, validates the response, and replaces the article's
//! category associations.

use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::completion::{CompletionRequest, CompletionService};
use crate::store::ArticleStore;

const TEMPERATURE: f32 = 0.1;

/// The permitted category labels, with one designated fallback used when
/// nothing else fits. An explicit value rather than a hidden constant so
/// tests can swap in alternate vocabularies.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    names: Vec<String>,
    fallback: String,
}

impl Vocabulary {
    /// `fallback` is appended to `names` if not already present.
    pub fn new(names: Vec<String>, fallback: impl Into<String>) -> Self {
        let fallback = fallback.into();
        let mut names = names;
        if !names.contains(&fallback) {
            names.push(fallback.clone());
        }
        Self { names, fallback }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(
            [
                "Web Development",
                "MLOps",
                "Large Language Models",
                "Data Science",
                "AI General",
                "Software Engineering",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            "Other",
        )
    }
}

/// Outcome of a categorization pass. None of these abort the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorizationStatus {
    /// Associations were replaced with these names (⊆ vocabulary).
    Assigned(Vec<String>),
    /// The response contained no usable label; associations were cleared.
    NoneAssigned,
    /// The completion call itself failed; associations were left untouched.
    Failed(String),
}

impl CategorizationStatus {
    pub fn failed(&self) -> bool {
        matches!(self, CategorizationStatus::Failed(_))
    }
}

pub struct Categorizer {
    service: Arc<dyn CompletionService>,
    store: Arc<dyn ArticleStore>,
    vocabulary: Vocabulary,
}

impl Categorizer {
    pub fn new(
        service: Arc<dyn CompletionService>,
        store: Arc<dyn ArticleStore>,
        vocabulary: Vocabulary,
    ) -> Self {
        Self {
            service,
            store,
            vocabulary,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Categorize one article from its summary. The outer `Result` carries
    /// store failures only; everything the completion service does wrong is
    /// folded into the returned status.
    #[instrument(skip_all, fields(article_id = %article_id))]
    pub async fn categorize(
        &self,
        article_id: Uuid,
        summary: &str,
    ) -> anyhow::Result<CategorizationStatus> {
        // Make sure every vocabulary label exists before validation runs
        // against the persisted set.
        for name in self.vocabulary.names() {
            self.store.get_or_create_category(name).await?;
        }

        let response = match self.service.complete(self.build_request(summary)).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "categorization call failed");
                return Ok(CategorizationStatus::Failed(e.to_string()));
            }
        };

        let suggested = parse_names(&response);
        let in_vocabulary: Vec<String> = suggested
            .iter()
            .filter(|name| self.vocabulary.contains(name))
            .cloned()
            .collect();
        let valid = self.store.categories_by_names(&in_vocabulary).await?;
        debug!(?suggested, valid = valid.len(), "validated suggested categories");

        if !valid.is_empty() {
            let ids: Vec<Uuid> = valid.iter().map(|c| c.id).collect();
            self.store.replace_article_categories(article_id, &ids).await?;
            return Ok(CategorizationStatus::Assigned(
                valid.into_iter().map(|c| c.name).collect(),
            ));
        }

        // Nothing validated, but the raw response asked for the fallback
        if suggested.iter().any(|name| name == self.vocabulary.fallback()) {
            let fallback = self
                .store
                .categories_by_names(&[self.vocabulary.fallback().to_string()])
                .await?;
            if let Some(category) = fallback.first() {
                self.store
                    .replace_article_categories(article_id, &[category.id])
                    .await?;
                return Ok(CategorizationStatus::Assigned(vec![category.name.clone()]));
            }
        }

        self.store.replace_article_categories(article_id, &[]).await?;
        Ok(CategorizationStatus::NoneAssigned)
    }

    fn build_request(&self, summary: &str) -> CompletionRequest {
        let label_list = self
            .vocabulary
            .names()
            .iter()
            .map(|name| format!("'{name}'"))
            .collect::<Vec<_>>()
            .join(", ");

        CompletionRequest::new(
            format!(
                "You are a helpful assistant that categorizes technical articles based on \
                 their summary. Assign one or more relevant categories from the following \
                 list: {label_list}. Respond with ONLY the category names, separated by \
                 commas. If none fit well, respond with '{}'.",
                self.vocabulary.fallback()
            ),
            format!("Please categorize the following article summary:\n\n{summary}"),
            TEMPERATURE,
        )
    }
}

/// Split a comma-separated response into trimmed, non-empty names. Quotes
/// are stripped since models often echo the quoting used in the prompt.
fn parse_names(response: &str) -> Vec<String> {
    response
        .split(',')
        .map(|name| name.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names_splits_and_trims() {
        assert_eq!(
            parse_names(" Web Development , MLOps,,  'Other' "),
            vec!["Web Development", "MLOps", "Other"]
        );
    }

    #[test]
    fn parse_names_of_empty_response() {
        assert!(parse_names("").is_empty());
        assert!(parse_names(" , , ").is_empty());
    }

    #[test]
    fn vocabulary_always_includes_fallback() {
        let vocab = Vocabulary::new(vec!["A".to_string()], "Other");
        assert!(vocab.contains("Other"));
        assert_eq!(vocab.fallback(), "Other");

        let vocab = Vocabulary::new(vec!["A".to_string(), "Other".to_string()], "Other");
        assert_eq!(vocab.names().len(), 2);
    }

    #[test]
    fn default_vocabulary_matches_curated_labels() {
        let vocab = Vocabulary::default();
        assert!(vocab.contains("Large Language Models"));
        assert!(vocab.contains("Other"));
        assert_eq!(vocab.names().len(), 7);
    }
}
