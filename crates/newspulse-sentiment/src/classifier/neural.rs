//! Three-class finance sentiment model behind an HTTP inference server.

use async_trait::async_trait;
use newspulse_core::{Classification, Label};
use serde::{Deserialize, Serialize};

use crate::error::SentimentError;

/// Longest input, in whitespace tokens, sent to the model. The server
/// truncates again to the model's exact sub-word limit.
pub const MAX_TOKENS: usize = 512;

/// Class order of the logits returned by [`SentimentModel::logits`].
pub const CLASS_LABELS: [Label; 3] = [Label::Negative, Label::Neutral, Label::Positive];

/// A pretrained sequence classifier producing raw logits.
#[async_trait]
pub trait SentimentModel: Send + Sync {
    /// Logits for `text` in [`CLASS_LABELS`] order.
    async fn logits(&self, text: &str) -> Result<[f32; 3], SentimentError>;
}

/// Text Embeddings Inference client for a hosted sequence classifier.
pub struct TeiModel {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: &'a str,
    truncate: bool,
    raw_scores: bool,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    score: f32,
    label: String,
}

impl TeiModel {
    #[must_use]
    pub fn new(client: reqwest::Client, tei_url: &str) -> Self {
        Self {
            client,
            url: format!("{}/predict", tei_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl SentimentModel for TeiModel {
    async fn logits(&self, text: &str) -> Result<[f32; 3], SentimentError> {
        let request = PredictRequest {
            inputs: text,
            truncate: true,
            raw_scores: true,
        };
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SentimentError::Model(format!("TEI request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SentimentError::Model(format!(
                "TEI returned status {}",
                response.status()
            )));
        }

        let predictions: Vec<Prediction> = response
            .json()
            .await
            .map_err(|e| SentimentError::Model(format!("TEI response parse error: {e}")))?;

        logits_from_predictions(&predictions)
    }
}

/// Reorder TEI predictions into [`CLASS_LABELS`] order by label name.
fn logits_from_predictions(predictions: &[Prediction]) -> Result<[f32; 3], SentimentError> {
    let mut logits: [Option<f32>; 3] = [None; 3];
    for prediction in predictions {
        if let Some(index) = class_index(&prediction.label) {
            logits[index] = Some(prediction.score);
        }
    }

    match logits {
        [Some(negative), Some(neutral), Some(positive)] => Ok([negative, neutral, positive]),
        _ => {
            let labels: Vec<&str> = predictions.iter().map(|p| p.label.as_str()).collect();
            Err(SentimentError::Model(format!(
                "expected negative/neutral/positive scores, got [{}]",
                labels.join(", ")
            )))
        }
    }
}

fn class_index(label: &str) -> Option<usize> {
    match label.trim().to_ascii_lowercase().as_str() {
        "negative" | "label_0" => Some(0),
        "neutral" | "label_1" => Some(1),
        "positive" | "label_2" => Some(2),
        _ => None,
    }
}

/// Keep at most `max` whitespace-separated tokens.
#[must_use]
pub fn truncate_tokens(text: &str, max: usize) -> String {
    text.split_whitespace()
        .take(max)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Numerically stable softmax.
#[must_use]
pub fn softmax(logits: [f32; 3]) -> [f32; 3] {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps = logits.map(|l| (l - max).exp());
    let sum: f32 = exps.iter().sum();
    exps.map(|e| e / sum)
}

/// Arg-max label of the softmaxed logits, scored by its probability.
/// Ties resolve to the earliest class.
#[must_use]
pub fn classify_logits(logits: [f32; 3]) -> Classification {
    let probabilities = softmax(logits);
    let mut best = 0;
    for (i, p) in probabilities.iter().enumerate().skip(1) {
        if *p > probabilities[best] {
            best = i;
        }
    }
    Classification {
        label: CLASS_LABELS[best],
        score: f64::from(probabilities[best]),
    }
}
