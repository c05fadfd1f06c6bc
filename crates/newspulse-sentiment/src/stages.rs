//! Bounded fan-out stages: fetch across queries, classify across articles.

use futures::stream::{self, StreamExt};
use newspulse_core::{Article, Classification, DetailedResult};
use tokio::task::JoinHandle;

use crate::classifier::{classify_local, Classifier, Method};
use crate::error::SentimentError;
use crate::feed::FeedFetcher;

/// Fetch articles for every query with at most `min(max_concurrency,
/// queries.len())` queries in flight.
///
/// A query whose feed cannot be retrieved or parsed contributes nothing;
/// the others still complete. Output order follows completion, not input.
pub async fn fetch_all(
    fetcher: &FeedFetcher,
    queries: &[String],
    per_query_limit: usize,
    max_concurrency: usize,
) -> Vec<Article> {
    if queries.is_empty() {
        return Vec::new();
    }
    let workers = max_concurrency.max(1).min(queries.len());

    let batches: Vec<Vec<Article>> = stream::iter(queries)
        .map(|query| async move {
            match fetcher.fetch(query, per_query_limit).await {
                Ok(articles) => {
                    tracing::debug!(query = %query, count = articles.len(), "query fetched");
                    articles
                }
                Err(e) => {
                    tracing::warn!(query = %query, error = %e, "feed fetch failed; skipping query");
                    Vec::new()
                }
            }
        })
        .buffer_unordered(workers)
        .collect()
        .await;

    batches.into_iter().flatten().collect()
}

/// Classify every article's content with at most `min(max_concurrency,
/// articles.len())` in flight. Output has the same length and order as
/// `articles`.
///
/// Each classification runs on its own task: the blocking pool for the
/// lexicon methods, a runtime task for the neural model. The caller only
/// awaits the handles, so it must be inside a Tokio runtime.
///
/// A failed classification is retried once. If it fails again the entry is
/// kept as Neutral/0.0 with the error recorded on it.
pub async fn classify_all(
    classifier: &Classifier,
    articles: &[Article],
    method: Method,
    max_concurrency: usize,
) -> Vec<DetailedResult> {
    if articles.is_empty() {
        return Vec::new();
    }
    let workers = max_concurrency.max(1).min(articles.len());

    stream::iter(articles)
        .map(|article| classify_article(classifier, article, method))
        .buffered(workers)
        .collect()
        .await
}

async fn classify_article(
    classifier: &Classifier,
    article: &Article,
    method: Method,
) -> DetailedResult {
    let outcome = match run_on_worker(classifier, &article.content, method).await {
        Ok(classification) => Ok(classification),
        Err(first) => {
            tracing::debug!(link = %article.link, error = %first, "classification failed; retrying once");
            run_on_worker(classifier, &article.content, method).await
        }
    };

    match outcome {
        Ok(classification) => DetailedResult::new(article, classification),
        Err(e) => {
            tracing::warn!(
                link = %article.link,
                method = %method,
                error = %e,
                "classification failed twice; recording neutral result"
            );
            DetailedResult::degraded(article, e.to_string())
        }
    }
}

async fn run_on_worker(
    classifier: &Classifier,
    text: &str,
    method: Method,
) -> Result<Classification, SentimentError> {
    let text = text.to_string();
    let handle: JoinHandle<Result<Classification, SentimentError>> = match method {
        Method::Lexicon | Method::Heuristic => tokio::task::spawn_blocking(move || {
            classify_local(&text, method).ok_or(SentimentError::ModelUnavailable)
        }),
        Method::Neural => {
            let classifier = classifier.clone();
            tokio::spawn(async move { classifier.classify(&text, method).await })
        }
    };
    handle.await?
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use newspulse_core::Label;

    use super::*;
    use crate::classifier::neural::SentimentModel;
    use crate::error::SentimentError;

    fn article(title: &str, content: &str) -> Article {
        Article {
            title: title.to_string(),
            link: format!("https://example.com/{title}"),
            published: String::new(),
            content: content.to_string(),
        }
    }

    /// Answers by content keyword after a delay that shrinks with position,
    /// so later articles finish first.
    struct SlowModel;

    #[async_trait]
    impl SentimentModel for SlowModel {
        async fn logits(&self, text: &str) -> Result<[f32; 3], SentimentError> {
            let delay = if text.contains("first") { 40 } else { 5 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            if text.contains("up") {
                Ok([0.0, 0.0, 5.0])
            } else {
                Ok([5.0, 0.0, 0.0])
            }
        }
    }

    /// Fails the first `failures` calls, then reports positive.
    struct FlakyModel {
        failures: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SentimentModel for FlakyModel {
        async fn logits(&self, _text: &str) -> Result<[f32; 3], SentimentError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(SentimentError::Model("transient".to_string()))
            } else {
                Ok([0.0, 0.0, 3.0])
            }
        }
    }

    /// Holds its thread for a fixed time without yielding, like CPU-bound
    /// inference.
    struct BlockingModel;

    #[async_trait]
    impl SentimentModel for BlockingModel {
        async fn logits(&self, _text: &str) -> Result<[f32; 3], SentimentError> {
            std::thread::sleep(Duration::from_millis(200));
            Ok([0.0, 0.0, 1.0])
        }
    }

    struct PanickingModel;

    #[async_trait]
    impl SentimentModel for PanickingModel {
        async fn logits(&self, text: &str) -> Result<[f32; 3], SentimentError> {
            assert!(text.is_empty(), "model crashed on {text:?}");
            Ok([0.0, 1.0, 0.0])
        }
    }

    #[tokio::test]
    async fn classify_all_of_nothing_is_empty() {
        let results = classify_all(&Classifier::new(), &[], Method::Lexicon, 8).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn classify_all_preserves_input_order() {
        let articles = vec![
            article("a1", "I love this stock!"),
            article("a2", "This is a bad investment."),
            article("a3", "It's okay, not great."),
        ];
        let results = classify_all(&Classifier::new(), &articles, Method::Lexicon, 8).await;
        assert_eq!(results.len(), 3);
        for (result, source) in results.iter().zip(&articles) {
            assert_eq!(result.title, source.title);
        }
        assert_eq!(results[0].label, Label::Positive);
        assert_eq!(results[1].label, Label::Negative);
        assert_eq!(results[2].label, Label::Neutral);
    }

    #[tokio::test]
    async fn classify_all_keeps_order_when_later_items_finish_first() {
        let classifier = Classifier::with_model(Arc::new(SlowModel));
        let articles = vec![
            article("first", "first and up"),
            article("second", "second and down"),
            article("third", "third and up"),
        ];
        let results = classify_all(&classifier, &articles, Method::Neural, 3).await;
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "third"]);
        assert_eq!(results[0].label, Label::Positive);
        assert_eq!(results[1].label, Label::Negative);
    }

    #[tokio::test]
    async fn single_failure_is_retried() {
        let model = Arc::new(FlakyModel {
            failures: 1,
            calls: AtomicUsize::new(0),
        });
        let classifier = Classifier::with_model(model.clone());
        let results =
            classify_all(&classifier, &[article("a", "shares up")], Method::Neural, 1).await;
        assert_eq!(results[0].label, Label::Positive);
        assert!(!results[0].is_degraded());
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn repeated_failure_degrades_entry_without_dropping_it() {
        let model = Arc::new(FlakyModel {
            failures: usize::MAX,
            calls: AtomicUsize::new(0),
        });
        let classifier = Classifier::with_model(model);
        let articles = vec![article("a", "one"), article("b", "two")];
        let results = classify_all(&classifier, &articles, Method::Neural, 2).await;
        assert_eq!(results.len(), 2);
        for result in &results {
            assert_eq!(result.label, Label::Neutral);
            assert_eq!(result.score, 0.0);
            assert!(result.error.as_deref().unwrap().contains("transient"));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn classify_all_scores_articles_in_parallel() {
        let classifier = Classifier::with_model(Arc::new(BlockingModel));
        let articles: Vec<Article> = (0..4)
            .map(|i| article(&format!("a{i}"), "steady quarter"))
            .collect();

        let started = std::time::Instant::now();
        let results = classify_all(&classifier, &articles, Method::Neural, 4).await;
        let elapsed = started.elapsed();

        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.label == Label::Positive));
        assert!(
            elapsed < Duration::from_millis(600),
            "four 200ms classifications took {elapsed:?}"
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn lexicon_scoring_on_workers_keeps_order_and_labels() {
        let articles: Vec<Article> = (0..24)
            .map(|i| {
                let text = if i % 2 == 0 {
                    "I love this stock!"
                } else {
                    "This is a bad investment."
                };
                article(&format!("a{i}"), text)
            })
            .collect();
        let results = classify_all(&Classifier::new(), &articles, Method::Lexicon, 8).await;
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.title, format!("a{i}"));
            let expected = if i % 2 == 0 { Label::Positive } else { Label::Negative };
            assert_eq!(result.label, expected);
        }
    }

    #[tokio::test]
    async fn crashed_worker_degrades_entry() {
        let classifier = Classifier::with_model(Arc::new(PanickingModel));
        let results =
            classify_all(&classifier, &[article("a", "text")], Method::Neural, 1).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].label, Label::Neutral);
        assert!(results[0].error.as_deref().unwrap().contains("worker"));
    }

    #[tokio::test]
    async fn fetch_all_of_no_queries_is_empty() {
        let fetcher = FeedFetcher::with_client(reqwest::Client::new(), "http://127.0.0.1:9");
        let articles = fetch_all(&fetcher, &[], 5, 8).await;
        assert!(articles.is_empty());
    }
}
