use std::sync::Arc;
use tracing::{instrument, warn};

use crate::completion::{CompletionRequest, CompletionService};

const TEMPERATURE: f32 = 0.2;

/// Outcome of a translation attempt. Only `Translated` carries text; the
/// other variants leave the stored translation empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationStatus {
    Translated(String),
    NothingToTranslate,
    Failed(String),
}

impl TranslationStatus {
    /// The text to persist for this outcome — empty unless translated.
    pub fn text(&self) -> &str {
        match self {
            TranslationStatus::Translated(text) => text,
            _ => "",
        }
    }

    pub fn failed(&self) -> bool {
        matches!(self, TranslationStatus::Failed(_))
    }
}

pub struct Translator {
    service: Arc<dyn CompletionService>,
    target_language: String,
}

impl Translator {
    pub fn new(service: Arc<dyn CompletionService>, target_language: impl Into<String>) -> Self {
        Self {
            service,
            target_language: target_language.into(),
        }
    }

    /// Translate a summary into the target language. Never returns an
    /// error: failures degrade to `Failed`, which the pipeline records and
    /// persists as an empty translation.
    #[instrument(skip_all, fields(target = %self.target_language))]
    pub async fn translate(&self, text: &str) -> TranslationStatus {
        if text.trim().is_empty() {
            return TranslationStatus::NothingToTranslate;
        }

        let request = CompletionRequest::new(
            format!(
                "You are a helpful assistant that translates English text to {}.",
                self.target_language
            ),
            format!(
                "Please translate the following English text accurately to {}:\n\n{}",
                self.target_language, text
            ),
            TEMPERATURE,
        );

        match self.service.complete(request).await {
            Ok(translated) if !translated.trim().is_empty() => {
                TranslationStatus::Translated(translated.trim().to_string())
            }
            Ok(_) => TranslationStatus::Failed("translation produced no text".to_string()),
            Err(e) => {
                warn!(error = %e, "translation failed");
                TranslationStatus::Failed(e.to_string())
            }
        }
    }
}
