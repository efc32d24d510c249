//! Charset detection and UTF-8 decoding for fetched pages.
//!
//! Detection order: Content-Type header, `<meta charset>` / http-equiv tags
//! in the first 4KB, then chardetng's statistical guess.

use crate::fetcher::{errors::FetchError, types::FetchedPage};
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use url::Url;

const META_SNIFF_LEN: usize = 4096;

static HEADER_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

pub fn decode_page(
    url_final: Url,
    status: StatusCode,
    body_bytes: &[u8],
    content_type: &str,
) -> Result<FetchedPage, FetchError> {
    let encoding = detect_encoding(content_type, body_bytes);
    let (decoded, had_errors) = {
        let (cow, _actual, had_errors) = encoding.decode(body_bytes);
        (cow.into_owned(), had_errors)
    };

    if had_errors {
        return Err(FetchError::Charset(format!(
            "failed to decode body as {}",
            encoding.name()
        )));
    }

    Ok(FetchedPage {
        url_final,
        status,
        body: decoded,
        encoding: encoding.name(),
        fetched_at: Utc::now(),
    })
}

fn detect_encoding(content_type: &str, body_bytes: &[u8]) -> &'static Encoding {
    if let Some(encoding) = encoding_from_capture(&HEADER_CHARSET_REGEX, content_type) {
        return encoding;
    }

    let sniff = &body_bytes[..body_bytes.len().min(META_SNIFF_LEN)];
    let sniff_str = String::from_utf8_lossy(sniff);

    if let Some(encoding) = encoding_from_capture(&META_CHARSET_REGEX, &sniff_str) {
        return encoding;
    }
    if let Some(encoding) = encoding_from_capture(&META_HTTP_EQUIV_REGEX, &sniff_str) {
        return encoding;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(sniff, false);
    detector.guess(None, true)
}

fn encoding_from_capture(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}
