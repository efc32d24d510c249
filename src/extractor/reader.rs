use readability::extractor;
use scraper::{Html, Selector};
use url::Url;

use crate::extractor::model::ReadableContent;

/// Minimum text length for a selector hit to count as the main content.
const MIN_SELECTOR_TEXT_LEN: usize = 100;

pub fn extract(html: &str, url: Url) -> Option<ReadableContent> {
    // Readability does the heavy lifting for well-structured pages
    if let Ok(article) = extractor::extract(&mut html.as_bytes(), &url)
        && !article.text.trim().is_empty()
    {
        return Some(ReadableContent {
            title: article.title,
            text: article.text,
        });
    }

    heuristic_extract(html)
}

/// Fallback for pages readability cannot handle: walk a list of likely
/// content containers and take the first with a substantial amount of text.
fn heuristic_extract(html: &str) -> Option<ReadableContent> {
    let document = Html::parse_document(html);

    let title = extract_title(&document)?;
    let text = extract_body_text(&document);

    if text.trim().is_empty() {
        return None;
    }

    Some(ReadableContent { title, text })
}

fn extract_title(document: &Html) -> Option<String> {
    for selector_str in ["meta[property='og:title']", "title", "h1"] {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for element in document.select(&selector) {
            let value = match element.value().attr("content") {
                Some(content) => content.trim().to_string(),
                None => element.text().collect::<String>().trim().to_string(),
            };
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}

fn extract_body_text(document: &Html) -> String {
    let content_selectors = [
        "article",
        "main",
        "[role='main']",
        ".post",
        ".article",
        ".entry-content",
        "#content",
    ];

    for selector_str in content_selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                let text = element.text().collect::<String>();
                if text.trim().len() > MIN_SELECTOR_TEXT_LEN {
                    return text;
                }
            }
        }
    }

    // Last resort: the whole body
    if let Ok(body_selector) = Selector::parse("body")
        && let Some(body) = document.select(&body_selector).next()
    {
        return body.text().collect::<String>();
    }

    String::new()
}
