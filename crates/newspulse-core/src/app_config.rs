pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_USER_AGENT: &str = "newspulse/0.1 (news-sentiment)";
pub const DEFAULT_ARTICLES_PER_QUERY: usize = 5;
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;
pub const DEFAULT_FEED_BASE_URL: &str = "https://news.google.com";

/// Runtime settings for one pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub log_level: String,
    /// Timeout applied to every outbound HTTP request (feed, page, model).
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Feed entries taken per expanded query.
    pub articles_per_query: usize,
    /// Upper bound on in-flight work per stage. Never zero.
    pub max_concurrency: usize,
    /// Origin of the RSS search endpoint, without a trailing slash.
    pub feed_base_url: String,
    /// Text Embeddings Inference server hosting the finance sentiment model.
    /// `None` disables the neural method.
    pub tei_url: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            articles_per_query: DEFAULT_ARTICLES_PER_QUERY,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            feed_base_url: DEFAULT_FEED_BASE_URL.to_string(),
            tei_url: None,
        }
    }
}
