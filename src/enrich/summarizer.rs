//! Map-reduce summarization: long documents are split into bounded chunks,
//! each chunk summarized independently, then the chunk summaries are
//! summarized once more into the final text.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::completion::{CompletionError, CompletionRequest, CompletionService};

/// Chunking policy. Bounds the prompt for very long pages while keeping
/// typical articles in a single pass.
pub const MAX_CHUNK_CHARS: usize = 12_000;
pub const CHUNK_OVERLAP_CHARS: usize = 200;

const TEMPERATURE: f32 = 0.2;

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that writes concise, faithful summaries of technical articles.";

pub struct Summarizer {
    service: Arc<dyn CompletionService>,
}

impl Summarizer {
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self { service }
    }

    /// Summarize the full article text. An empty result is a valid outcome
    /// (the caller maps it to a summary-extraction failure); only transport
    /// and API errors surface as `Err`.
    #[instrument(skip_all, fields(chars = text.len()))]
    pub async fn summarize(&self, text: &str) -> Result<String, CompletionError> {
        let chunks = split_into_chunks(text, MAX_CHUNK_CHARS, CHUNK_OVERLAP_CHARS);
        debug!(chunks = chunks.len(), "summarizing document");

        match chunks.len() {
            0 => Ok(String::new()),
            1 => {
                let summary = self.summarize_chunk(&chunks[0]).await?;
                Ok(summary.trim().to_string())
            }
            _ => {
                let mut partials = Vec::with_capacity(chunks.len());
                for chunk in &chunks {
                    let partial = self.summarize_chunk(chunk).await?;
                    if !partial.trim().is_empty() {
                        partials.push(partial.trim().to_string());
                    }
                }
                if partials.is_empty() {
                    return Ok(String::new());
                }
                let combined = partials.join("\n\n");
                let reduced = self
                    .service
                    .complete(CompletionRequest::new(
                        SYSTEM_PROMPT,
                        format!(
                            "The following are partial summaries of one article. \
                             Combine them into a single coherent summary:\n\n{combined}"
                        ),
                        TEMPERATURE,
                    ))
                    .await?;
                Ok(reduced.trim().to_string())
            }
        }
    }

    async fn summarize_chunk(&self, chunk: &str) -> Result<String, CompletionError> {
        self.service
            .complete(CompletionRequest::new(
                SYSTEM_PROMPT,
                format!("Summarize the following article text in a short paragraph:\n\n{chunk}"),
                TEMPERATURE,
            ))
            .await
    }
}

/// Split `text` into chunks of at most `max_chars` characters, preferring
/// whitespace boundaries, with `overlap_chars` of trailing context carried
/// into the next chunk.
pub fn split_into_chunks(text: &str, max_chars: usize, overlap_chars: usize) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() <= max_chars {
        return vec![trimmed.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;
    while start < chars.len() {
        let window_end = (start + max_chars).min(chars.len());
        let mut cut = window_end;
        if window_end < chars.len()
            && let Some(pos) = chars[start..window_end].iter().rposition(|c| c.is_whitespace())
            && pos > 0
        {
            cut = start + pos;
        }

        let chunk: String = chars[start..cut].iter().collect();
        let chunk = chunk.trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }

        if cut >= chars.len() {
            break;
        }
        // Step forward, keeping some overlap but always making progress.
        start = cut.saturating_sub(overlap_chars).max(start + 1);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = split_into_chunks("a short document", 100, 10);
        assert_eq!(chunks, vec!["a short document".to_string()]);
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(split_into_chunks("", 100, 10).is_empty());
        assert!(split_into_chunks("   ", 100, 10).is_empty());
    }

    #[test]
    fn long_text_splits_on_whitespace() {
        let text = "alpha beta gamma delta epsilon zeta".to_string();
        let chunks = split_into_chunks(&text, 12, 2);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 12);
            // No chunk starts or ends mid-run of whitespace
            assert_eq!(chunk.trim(), chunk);
        }
        assert!(chunks[0].starts_with("alpha"));
        assert!(chunks.last().unwrap().ends_with("zeta"));
    }

    proptest! {
        #[test]
        fn chunks_respect_size_bound(text in "[a-z ]{0,500}", max in 10usize..100) {
            let chunks = split_into_chunks(&text, max, 5);
            for chunk in &chunks {
                prop_assert!(chunk.chars().count() <= max);
                prop_assert!(!chunk.trim().is_empty());
            }
            if text.trim().chars().count() <= max && !text.trim().is_empty() {
                prop_assert_eq!(chunks.len(), 1);
            }
        }

        #[test]
        fn chunking_always_terminates_and_covers_ends(text in "[a-z ]{1,500}") {
            let trimmed = text.trim().to_string();
            prop_assume!(!trimmed.is_empty());
            let chunks = split_into_chunks(&text, 50, 10);
            prop_assert!(!chunks.is_empty());
            let first_word = trimmed.split_whitespace().next().unwrap();
            prop_assert!(chunks[0].starts_with(first_word));
        }
    }
}
