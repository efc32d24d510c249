//! The enrichment pipeline and its stages.

pub mod categorizer;
pub mod pipeline;
pub mod reading_time;
pub mod report;
pub mod summarizer;
pub mod translator;

pub use categorizer::{CategorizationStatus, Categorizer, Vocabulary};
pub use pipeline::EnrichmentPipeline;
pub use report::{EnrichmentError, RunReport};
pub use summarizer::Summarizer;
pub use translator::{TranslationStatus, Translator};
