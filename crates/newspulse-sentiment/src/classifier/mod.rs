//! Sentiment classification over three interchangeable methods.

pub mod lexicon;
pub mod neural;
pub mod polarity;

use std::str::FromStr;
use std::sync::Arc;

use newspulse_core::{Classification, PipelineConfig};

use crate::error::SentimentError;
use neural::{SentimentModel, TeiModel};

/// Which scoring strategy to apply. Chosen by the caller, never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Valence lexicon with a compound score and a ±0.05 neutral band.
    Lexicon,
    /// Averaged word polarity, split strictly at zero.
    Heuristic,
    /// Finance-tuned transformer served over HTTP.
    Neural,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Lexicon => "vader",
            Method::Heuristic => "textblob",
            Method::Neural => "finbert",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = SentimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vader" | "lexicon" => Ok(Method::Lexicon),
            "textblob" | "heuristic" => Ok(Method::Heuristic),
            "finbert" | "neural" => Ok(Method::Neural),
            _ => Err(SentimentError::UnknownMethod(s.to_string())),
        }
    }
}

/// Scores text with any supported [`Method`].
///
/// Construction forces the process-wide lexicon tables so the first
/// classification does not pay their build cost. Cloning is cheap; the
/// optional neural model is shared behind an `Arc`.
#[derive(Clone)]
pub struct Classifier {
    model: Option<Arc<dyn SentimentModel>>,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("neural", &self.model.is_some())
            .finish()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Lexicon and heuristic methods only.
    #[must_use]
    pub fn new() -> Self {
        lexicon::warm_up();
        polarity::warm_up();
        Self { model: None }
    }

    /// All three methods, with `model` backing [`Method::Neural`].
    #[must_use]
    pub fn with_model(model: Arc<dyn SentimentModel>) -> Self {
        let mut classifier = Self::new();
        classifier.model = Some(model);
        classifier
    }

    /// Enable the neural method when `config.tei_url` is set.
    #[must_use]
    pub fn from_config(config: &PipelineConfig, client: reqwest::Client) -> Self {
        match config.tei_url.as_deref() {
            Some(url) => Self::with_model(Arc::new(TeiModel::new(client, url))),
            None => Self::new(),
        }
    }

    #[must_use]
    pub fn supports(&self, method: Method) -> bool {
        method != Method::Neural || self.model.is_some()
    }

    /// # Errors
    ///
    /// Returns [`SentimentError::ModelUnavailable`] when `method` is neural
    /// and no model is configured.
    pub fn ensure_supported(&self, method: Method) -> Result<(), SentimentError> {
        if self.supports(method) {
            Ok(())
        } else {
            Err(SentimentError::ModelUnavailable)
        }
    }

    /// Classify `text` with `method`.
    ///
    /// Blank text is Neutral/0.0 for the neural method without a model call.
    /// The lexicon and heuristic methods score blank text as 0.0, which also
    /// maps to Neutral.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::ModelUnavailable`] for neural scoring without
    /// a model, or the model's own error if inference fails.
    pub async fn classify(
        &self,
        text: &str,
        method: Method,
    ) -> Result<Classification, SentimentError> {
        if let Some(classification) = classify_local(text, method) {
            return Ok(classification);
        }
        if text.trim().is_empty() {
            return Ok(Classification::neutral());
        }
        let model = self.model.as_ref().ok_or(SentimentError::ModelUnavailable)?;
        let input = neural::truncate_tokens(text, neural::MAX_TOKENS);
        let logits = model.logits(&input).await?;
        Ok(neural::classify_logits(logits))
    }
}

/// Score `text` with one of the table-driven methods, synchronously.
///
/// Returns `None` for [`Method::Neural`], which needs a model.
#[must_use]
pub fn classify_local(text: &str, method: Method) -> Option<Classification> {
    match method {
        Method::Lexicon => {
            let score = lexicon::compound(text);
            Some(Classification {
                label: lexicon::label_for(score),
                score,
            })
        }
        Method::Heuristic => {
            let score = polarity::polarity(text);
            Some(Classification {
                label: polarity::label_for(score),
                score,
            })
        }
        Method::Neural => None,
    }
}

/// Split on whitespace and trim surrounding punctuation, keeping inner
/// apostrophes and hyphens. Empty tokens are dropped.
pub(crate) fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
        .collect()
}

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "nowhere", "cannot",
    "without", "isnt", "arent", "wasnt", "werent", "dont", "doesnt", "didnt", "wont", "wouldnt",
    "shouldnt", "couldnt", "cant", "aint", "hasnt", "havent", "hadnt",
];

/// `token` must already be lowercase.
pub(crate) fn is_negation(token: &str) -> bool {
    token.ends_with("n't") || token.ends_with("n’t") || NEGATIONS.contains(&token)
}
