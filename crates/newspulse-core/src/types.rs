use serde::{Deserialize, Serialize};

/// Sentiment class assigned to one article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    /// All labels in report order.
    pub const ALL: [Label; 3] = [Label::Positive, Label::Negative, Label::Neutral];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Positive => "Positive",
            Label::Negative => "Negative",
            Label::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A news article with its extracted body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    /// Timestamp exactly as the feed provided it.
    pub published: String,
    /// Never empty once produced by the content extractor.
    pub content: String,
}

/// Output of one classifier call.
///
/// The scale of `score` depends on the method: compound polarity in
/// `[-1.0, 1.0]` for lexicon and heuristic scoring, class probability in
/// `[0.0, 1.0]` for the neural model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: Label,
    pub score: f64,
}

impl Classification {
    /// Neutral label with a zero score.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            label: Label::Neutral,
            score: 0.0,
        }
    }
}

/// One article's metadata joined with its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedResult {
    pub title: String,
    pub link: String,
    pub published: String,
    pub label: Label,
    pub score: f64,
    /// Set when classification failed and the entry was degraded to Neutral/0.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetailedResult {
    #[must_use]
    pub fn new(article: &Article, classification: Classification) -> Self {
        Self {
            title: article.title.clone(),
            link: article.link.clone(),
            published: article.published.clone(),
            label: classification.label,
            score: classification.score,
            error: None,
        }
    }

    /// Neutral/0.0 entry carrying the reason classification failed.
    #[must_use]
    pub fn degraded(article: &Article, reason: impl Into<String>) -> Self {
        Self {
            error: Some(reason.into()),
            ..Self::new(article, Classification::neutral())
        }
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Per-label counts and their share of the total, in percent.
///
/// Percentages are all `0.0` when there are no results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    positive: usize,
    negative: usize,
    neutral: usize,
    positive_percentage: f64,
    negative_percentage: f64,
    neutral_percentage: f64,
}

impl Summary {
    #[must_use]
    pub fn from_counts(positive: usize, negative: usize, neutral: usize) -> Self {
        let total = positive + negative + neutral;
        #[allow(clippy::cast_precision_loss)]
        let pct = |count: usize| -> f64 {
            if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            }
        };

        Self {
            positive,
            negative,
            neutral,
            positive_percentage: pct(positive),
            negative_percentage: pct(negative),
            neutral_percentage: pct(neutral),
        }
    }

    #[must_use]
    pub fn count(&self, label: Label) -> usize {
        match label {
            Label::Positive => self.positive,
            Label::Negative => self.negative,
            Label::Neutral => self.neutral,
        }
    }

    #[must_use]
    pub fn percentage(&self, label: Label) -> f64 {
        match label {
            Label::Positive => self.positive_percentage,
            Label::Negative => self.negative_percentage,
            Label::Neutral => self.neutral_percentage,
        }
    }
}

/// Final output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub detailed: Vec<DetailedResult>,
    pub summary: Summary,
    pub total: usize,
}
