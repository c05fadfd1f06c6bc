//! Averaged word-polarity scorer.
//!
//! Every known word contributes one assessment in `[-1.0, 1.0]`, scaled by
//! an intensifier directly before it and multiplied by `-0.5` when a
//! negation precedes it. The score is the mean of all assessments.

use std::collections::HashMap;
use std::sync::LazyLock;

use newspulse_core::Label;

use super::{is_negation, tokenize};

const NEGATION_FACTOR: f64 = -0.5;

const POLARITY: &[(&str, f64)] = &[
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("happy", 0.8),
    ("glad", 0.5),
    ("nice", 0.6),
    ("fine", 0.4167),
    ("positive", 0.227),
    ("wonderful", 1.0),
    ("fantastic", 0.4),
    ("perfect", 1.0),
    ("impressive", 1.0),
    ("exciting", 0.3),
    ("love", 0.5),
    ("strong", 0.433),
    ("stronger", 0.433),
    ("solid", 0.2),
    ("robust", 0.35),
    ("stable", 0.3),
    ("successful", 0.75),
    ("profitable", 0.5),
    ("bullish", 0.5),
    ("optimistic", 0.5),
    ("confident", 0.5),
    ("promising", 0.3),
    ("favorable", 0.4),
    ("healthy", 0.5),
    ("high", 0.16),
    ("higher", 0.25),
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("poor", -0.4),
    ("weak", -0.375),
    ("weaker", -0.375),
    ("negative", -0.3),
    ("sad", -0.5),
    ("unhappy", -0.6),
    ("angry", -0.5),
    ("disappointing", -0.6),
    ("disappointed", -0.75),
    ("worried", -0.5),
    ("risky", -0.5),
    ("volatile", -0.3),
    ("uncertain", -0.2),
    ("bearish", -0.5),
    ("dangerous", -0.6),
    ("low", -0.1),
    ("lower", -0.2),
    ("wrong", -0.5),
    ("difficult", -0.5),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("too", 1.2),
    ("quite", 1.1),
    ("highly", 1.4),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("absolutely", 1.5),
    ("somewhat", 0.8),
    ("slightly", 0.7),
    ("fairly", 0.9),
];

static POLARITY_TABLE: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| POLARITY.iter().copied().collect());

static INTENSIFIER_TABLE: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| INTENSIFIERS.iter().copied().collect());

/// Build the lookup tables now rather than on first use.
pub(crate) fn warm_up() {
    LazyLock::force(&POLARITY_TABLE);
    LazyLock::force(&INTENSIFIER_TABLE);
}

/// Mean polarity of the known words in `text`, in `[-1.0, 1.0]`.
/// `0.0` when no word is known.
#[must_use]
pub fn polarity(text: &str) -> f64 {
    let lowered: Vec<String> = tokenize(text).iter().map(|t| t.to_lowercase()).collect();

    let mut assessments = Vec::new();
    for (i, word) in lowered.iter().enumerate() {
        let Some(&base) = POLARITY_TABLE.get(word.as_str()) else {
            continue;
        };

        let mut value = base;
        let mut cursor = i;
        if cursor > 0 {
            if let Some(&factor) = INTENSIFIER_TABLE.get(lowered[cursor - 1].as_str()) {
                value *= factor;
                cursor -= 1;
            }
        }
        if cursor > 0 && is_negation(&lowered[cursor - 1]) {
            value *= NEGATION_FACTOR;
        }
        assessments.push(value.clamp(-1.0, 1.0));
    }

    if assessments.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
    mean.clamp(-1.0, 1.0)
}

/// Positive above zero, Negative below, Neutral at exactly zero.
#[must_use]
pub fn label_for(score: f64) -> Label {
    if score > 0.0 {
        Label::Positive
    } else if score < 0.0 {
        Label::Negative
    } else {
        Label::Neutral
    }
}
