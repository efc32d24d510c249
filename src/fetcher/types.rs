use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use url::Url;

/// A fetched HTML page, decoded to UTF-8.
#[derive(Debug)]
pub struct FetchedPage {
    /// URL after redirects.
    pub url_final: Url,
    pub status: StatusCode,
    /// Page body decoded to UTF-8 from whatever charset was detected.
    pub body: String,
    /// Name of the encoding the body was decoded from (e.g. "UTF-8").
    pub encoding: &'static str,
    pub fetched_at: DateTime<Utc>,
}
