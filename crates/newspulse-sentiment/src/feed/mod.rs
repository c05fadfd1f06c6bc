//! Google News RSS search and per-entry content extraction.

mod rss;

use std::time::Duration;

use newspulse_core::{Article, PipelineConfig};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

pub use rss::FeedEntry;

use crate::error::SentimentError;
use crate::extract::ContentExtractor;

/// Retrieves feed entries for a query and attaches extracted content.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: reqwest::Client,
    base_url: String,
    extractor: ContentExtractor,
}

impl FeedFetcher {
    /// Build a fetcher whose HTTP client carries the configured timeout and
    /// `User-Agent`. The same client is shared with the content extractor.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(config: &PipelineConfig) -> Result<Self, SentimentError> {
        let client = build_http_client(config)?;
        Ok(Self::with_client(client, &config.feed_base_url))
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            extractor: ContentExtractor::new(client.clone()),
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// RSS search URL for `query`.
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC).to_string();
        format!(
            "{}/rss/search?q={encoded}&hl=en-US&gl=US&ceid=US:en",
            self.base_url
        )
    }

    /// Fetch and parse up to `limit` entries for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] on network failure,
    /// [`SentimentError::UnexpectedStatus`] on a non-2xx response, or
    /// [`SentimentError::Xml`] on malformed RSS.
    pub async fn fetch_entries(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<FeedEntry>, SentimentError> {
        let url = self.search_url(query);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SentimentError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        rss::parse_rss_feed(&body, limit)
    }

    /// Fetch up to `limit` articles for `query`, extracting content for each
    /// entry in feed order.
    ///
    /// # Errors
    ///
    /// Propagates feed retrieval errors from [`Self::fetch_entries`]. Content
    /// extraction never fails.
    pub async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<Article>, SentimentError> {
        let entries = self.fetch_entries(query, limit).await?;
        tracing::debug!(query, count = entries.len(), "fetched feed entries");

        let mut articles = Vec::with_capacity(entries.len());
        for entry in entries {
            let content = self.extractor.extract(&entry).await;
            articles.push(Article {
                title: entry.title,
                link: entry.link,
                published: entry.published,
                content,
            });
        }
        Ok(articles)
    }
}

/// Shared HTTP client: one timeout bounds every feed, page, and model call.
///
/// # Errors
///
/// Returns [`SentimentError::Http`] if the client cannot be constructed.
pub fn build_http_client(config: &PipelineConfig) -> Result<reqwest::Client, SentimentError> {
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(&config.user_agent)
        .build()?;
    Ok(client)
}
