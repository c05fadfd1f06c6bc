//! Article body retrieval with a content-quality fallback.
//!
//! Scraping `<p>` text often yields paywall stubs or nothing at all for
//! script-rendered pages. The extractor therefore falls back to the feed's
//! own summary and title so every article carries non-trivial text.

use crate::feed::FeedEntry;
use crate::html::paragraph_text;

/// Returned in place of page text when the page cannot be retrieved.
pub const UNFETCHABLE_CONTENT: &str = "Content could not be fetched.";

/// Scraped text at least this long (in characters) is used as-is.
pub const MIN_SCRAPED_CHARS: usize = 200;

/// Content shorter than this is replaced by `"{title} {summary}"`.
pub const MIN_CONTENT_CHARS: usize = 50;

/// Fetches article pages and applies the fallback policy.
///
/// Holds a clone of the shared `reqwest::Client`, so the request timeout
/// configured on that client bounds every page fetch. One attempt per page.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    client: reqwest::Client,
}

impl ContentExtractor {
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Produce the body text for a feed entry. Never fails and never
    /// returns an empty string.
    pub async fn extract(&self, entry: &FeedEntry) -> String {
        let fetched = self.fetch_page_text(&entry.link).await;
        choose_content(&fetched, entry)
    }

    /// Paragraph text of the page at `url`, or [`UNFETCHABLE_CONTENT`] on
    /// any network, status, or body error. A non-2xx page counts as
    /// unfetchable; its error-page markup is never scraped.
    ///
    /// Parsing runs on the blocking pool.
    pub async fn fetch_page_text(&self, url: &str) -> String {
        let html = match self.fetch_page(url).await {
            Ok(html) => html,
            Err(reason) => {
                tracing::debug!(url, reason = %reason, "article page unavailable");
                return UNFETCHABLE_CONTENT.to_string();
            }
        };

        match tokio::task::spawn_blocking(move || paragraph_text(&html)).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(url, error = %e, "article parse task failed");
                UNFETCHABLE_CONTENT.to_string()
            }
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<String, String> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP status {status}"));
        }

        let bytes = response.bytes().await.map_err(|e| e.to_string())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Pick the article body from scraped text and feed metadata.
///
/// 1. Scraped text of at least [`MIN_SCRAPED_CHARS`] wins.
/// 2. Otherwise the feed summary, then the title, then the scraped text.
/// 3. Anything shorter than [`MIN_CONTENT_CHARS`] is replaced by the
///    combined title and summary when that is non-empty.
///
/// The result is trimmed and falls back to [`UNFETCHABLE_CONTENT`] if empty.
#[must_use]
pub fn choose_content(fetched: &str, entry: &FeedEntry) -> String {
    let summary = entry.summary.as_deref().unwrap_or("");
    let title = entry.title.as_str();

    let chosen = if fetched.chars().count() >= MIN_SCRAPED_CHARS {
        fetched
    } else if !summary.is_empty() {
        summary
    } else if !title.is_empty() {
        title
    } else {
        fetched
    };

    let mut content = chosen.to_string();
    if !content.is_empty() && content.chars().count() < MIN_CONTENT_CHARS {
        let combined = entry.combined_text();
        if !combined.is_empty() {
            content = combined;
        }
    }

    let content = content.trim();
    if content.is_empty() {
        UNFETCHABLE_CONTENT.to_string()
    } else {
        content.to_string()
    }
}
