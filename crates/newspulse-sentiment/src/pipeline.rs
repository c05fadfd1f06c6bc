//! End-to-end sentiment pipeline orchestration.

use newspulse_core::{Classification, PipelineConfig, Report};

use crate::aggregate::aggregate;
use crate::classifier::{Classifier, Method};
use crate::error::SentimentError;
use crate::feed::{build_http_client, FeedFetcher};
use crate::query::expand;
use crate::stages::{classify_all, fetch_all};

/// Fetcher, classifier, and settings for repeated pipeline runs.
///
/// Build once and reuse: construction creates the HTTP client and forces
/// the lexicon tables.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    fetcher: FeedFetcher,
    classifier: Classifier,
}

impl Pipeline {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn new(config: PipelineConfig) -> Result<Self, SentimentError> {
        let client = build_http_client(&config)?;
        let fetcher = FeedFetcher::with_client(client.clone(), &config.feed_base_url);
        let classifier = Classifier::from_config(&config, client);
        Ok(Self {
            config,
            fetcher,
            classifier,
        })
    }

    /// Replace the classifier, e.g. to supply a different neural model.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Expand `topic`, then fetch, classify, and aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::ModelUnavailable`] before any network work
    /// when `method` is neural and no model is configured. Fetch and
    /// per-article failures never surface here.
    pub async fn run(&self, topic: &str, method: Method) -> Result<Report, SentimentError> {
        let queries = expand(topic);
        self.run_queries(&queries, method).await
    }

    /// Run the pipeline over an explicit query set. No queries yields an
    /// empty report.
    ///
    /// # Errors
    ///
    /// Same as [`Self::run`].
    pub async fn run_queries(
        &self,
        queries: &[String],
        method: Method,
    ) -> Result<Report, SentimentError> {
        self.classifier.ensure_supported(method)?;

        let articles = fetch_all(
            &self.fetcher,
            queries,
            self.config.articles_per_query,
            self.config.max_concurrency,
        )
        .await;
        tracing::info!(
            queries = queries.len(),
            articles = articles.len(),
            "fetch stage complete"
        );

        let results = classify_all(
            &self.classifier,
            &articles,
            method,
            self.config.max_concurrency,
        )
        .await;
        let degraded = results.iter().filter(|r| r.is_degraded()).count();
        if degraded > 0 {
            tracing::warn!(degraded, total = results.len(), "some articles were not classified");
        }

        let report = aggregate(results);
        tracing::info!(total = report.total, method = %method, "sentiment report ready");
        Ok(report)
    }
}

/// Run the full pipeline for `topic`.
///
/// # Errors
///
/// See [`Pipeline::run`].
pub async fn run_pipeline(
    pipeline: &Pipeline,
    topic: &str,
    method: Method,
) -> Result<Report, SentimentError> {
    pipeline.run(topic, method).await
}

/// Classify a single text.
///
/// # Errors
///
/// See [`Classifier::classify`].
pub async fn classify(
    classifier: &Classifier,
    text: &str,
    method: Method,
) -> Result<Classification, SentimentError> {
    classifier.classify(text, method).await
}

/// Classify a single text with a method given by name, using the local
/// lexicon methods only.
///
/// # Errors
///
/// Returns [`SentimentError::UnknownMethod`] for an unrecognized name and
/// [`SentimentError::ModelUnavailable`] for non-blank text under the neural
/// method.
pub async fn classify_text(text: &str, method: &str) -> Result<Classification, SentimentError> {
    let method: Method = method.parse()?;
    Classifier::new().classify(text, method).await
}
