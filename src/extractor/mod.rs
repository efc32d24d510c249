pub mod language;
pub mod model;
pub mod reader;
pub mod reject;

pub use model::ExtractedDocument;

use crate::fetcher::types::FetchedPage;

/// Extract readable article content from a fetched page.
///
/// Returns `None` when the page has no usable article body (extraction
/// failed outright, or the result looks like a consent wall / error page).
pub fn extract(page: &FetchedPage) -> Option<ExtractedDocument> {
    let readable = reader::extract(&page.body, page.url_final.clone())?;

    let text = model::normalize_whitespace(&readable.text);
    if reject::should_reject(&readable.title, &text) {
        return None;
    }

    let language = language::detect_language(&text);

    Some(ExtractedDocument {
        title: readable.title,
        text,
        language,
        fetched_at: page.fetched_at,
    })
}
