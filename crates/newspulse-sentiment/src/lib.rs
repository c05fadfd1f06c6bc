//! News sentiment pipeline.
//!
//! Expands a topic into search queries, pulls matching articles from the
//! Google News RSS search feed, extracts their body text, classifies each one
//! with a lexicon, heuristic, or neural method, and aggregates the labels
//! into a [`Report`](newspulse_core::Report).

pub mod aggregate;
pub mod classifier;
pub mod error;
pub mod extract;
pub mod feed;
pub mod pipeline;
pub mod query;
pub mod stages;

mod html;

pub use aggregate::aggregate;
pub use classifier::neural::{SentimentModel, TeiModel};
pub use classifier::{Classifier, Method};
pub use error::SentimentError;
pub use extract::{ContentExtractor, UNFETCHABLE_CONTENT};
pub use feed::{FeedEntry, FeedFetcher};
pub use pipeline::{classify, classify_text, run_pipeline, Pipeline};
pub use query::expand;
pub use stages::{classify_all, fetch_all};
