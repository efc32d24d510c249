//! The text-completion seam: one system + user prompt in, one string out.
//! The summarizer, translator and categorizer all speak this trait; the
//! production implementation is an OpenAI-compatible chat client.

pub mod openai;

pub use openai::OpenAiCompletionService;

use async_trait::async_trait;
use thiserror::Error;

/// A single completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>, temperature: f32) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature,
        }
    }
}

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("completion API key not configured")]
    MissingApiKey,

    #[error("completion request failed: {0}")]
    Request(String),

    #[error("completion API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("completion response contained no choices")]
    EmptyResponse,
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Whether the service can be called at all (credentials present).
    /// The pipeline checks this once up front and downgrades to a partial
    /// save when it is false.
    fn is_configured(&self) -> bool;

    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}
