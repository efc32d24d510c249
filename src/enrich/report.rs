//! Structured result of a pipeline run. The enum variants are the contract
//! the admin trigger classifies on; `Display` is the only place run
//! outcomes become user-facing text.

use std::fmt::{Display, Formatter};
use thiserror::Error;

use super::categorizer::CategorizationStatus;
use super::translator::TranslationStatus;

/// Fatal run outcomes. `MissingUrl` and `Fetch` abort with nothing
/// persisted; the other two end the run after a partial save.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("no URL provided")]
    MissingUrl,

    #[error("fetching URL: {0}")]
    Fetch(String),

    #[error("completion API key not configured")]
    ServiceUnavailable,

    #[error("no summary could be extracted")]
    EmptySummary,
}

/// What a pipeline run did. A `Completed` run persisted the full field set
/// and carries the two independent sub-outcomes; a `Failed` run stopped at
/// one of the fatal errors.
#[derive(Debug)]
pub enum RunReport {
    Completed {
        translation: TranslationStatus,
        categorization: CategorizationStatus,
    },
    Failed(EnrichmentError),
}

impl RunReport {
    /// Classification used by the bulk trigger: only the fatal variants
    /// count as errors — a completed run with a failed translation or
    /// categorization is still a success.
    pub fn is_error(&self) -> bool {
        matches!(self, RunReport::Failed(_))
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RunReport::Failed(EnrichmentError::MissingUrl) => {
                write!(f, "Error: no URL provided.")
            }
            RunReport::Failed(EnrichmentError::Fetch(detail)) => {
                write!(f, "Error fetching URL: {detail}")
            }
            RunReport::Failed(EnrichmentError::ServiceUnavailable) => {
                write!(
                    f,
                    "Error: completion API key not configured. Title and reading time saved."
                )
            }
            RunReport::Failed(EnrichmentError::EmptySummary) => {
                write!(f, "Error extracting summary. Other fields saved.")
            }
            RunReport::Completed {
                translation,
                categorization,
            } => {
                write!(f, "Fetch, reading time and summary completed.")?;
                match translation {
                    TranslationStatus::Translated(_) => write!(f, " Translation completed.")?,
                    TranslationStatus::NothingToTranslate => write!(f, " Nothing to translate.")?,
                    TranslationStatus::Failed(detail) => {
                        write!(f, " Translation failed: {detail}.")?
                    }
                }
                match categorization {
                    CategorizationStatus::Assigned(names) => {
                        write!(f, " Categories set to: {}.", names.join(", "))?
                    }
                    CategorizationStatus::NoneAssigned => {
                        write!(f, " Warning: no valid categories assigned.")?
                    }
                    CategorizationStatus::Failed(detail) => {
                        write!(f, " Categorization failed: {detail}.")?
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failure_renders_with_error_prefix() {
        let report = RunReport::Failed(EnrichmentError::Fetch("connection refused".to_string()));
        let rendered = report.to_string();
        assert!(rendered.starts_with("Error fetching"));
        assert!(report.is_error());
    }

    #[test]
    fn missing_credentials_mention_api_key() {
        let report = RunReport::Failed(EnrichmentError::ServiceUnavailable);
        assert!(report.to_string().contains("API key"));
        assert!(report.is_error());
    }

    #[test]
    fn completed_run_reports_both_sub_outcomes() {
        let report = RunReport::Completed {
            translation: TranslationStatus::Failed("timeout".to_string()),
            categorization: CategorizationStatus::Assigned(vec!["MLOps".to_string()]),
        };
        let rendered = report.to_string();
        assert!(!rendered.starts_with("Error"));
        assert!(rendered.contains("Translation failed: timeout"));
        assert!(rendered.contains("Categories set to: MLOps"));
        assert!(!report.is_error());
    }

    #[test]
    fn no_category_warning_is_not_an_error() {
        let report = RunReport::Completed {
            translation: TranslationStatus::Translated("번역".to_string()),
            categorization: CategorizationStatus::NoneAssigned,
        };
        assert!(!report.is_error());
        assert!(report.to_string().contains("no valid categories"));
    }
}
