//! Valence-lexicon scorer producing a compound polarity in `[-1.0, 1.0]`.
//!
//! Each known word carries a valence on a `-4.0..=4.0` scale. Valences are
//! adjusted for nearby intensity words, negation, ALL-CAPS emphasis, a
//! contrastive "but", and trailing `!`/`?`, then summed and squashed with
//! `s / sqrt(s² + 15)`.

use std::collections::HashMap;
use std::sync::LazyLock;

use newspulse_core::Label;

use super::{is_negation, tokenize};

/// Scores at or beyond this magnitude are Positive/Negative.
pub const NEUTRAL_BAND: f64 = 0.05;

const ALPHA: f64 = 15.0;
const BOOSTER_INCR: f64 = 0.293;
const BOOSTER_DECR: f64 = -0.293;
const CAPS_INCR: f64 = 0.733;
/// Negated words flip and shrink: "not great" reads as lukewarm, not as
/// strongly negative.
const NEGATION_SCALAR: f64 = -0.3;
const EXCLAMATION_INCR: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_INCR: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;

const VALENCE: &[(&str, f64)] = &[
    // Positive, general
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 2.7),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("best", 3.2),
    ("better", 1.9),
    ("love", 3.2),
    ("loved", 2.9),
    ("loves", 2.7),
    ("happy", 2.7),
    ("glad", 2.0),
    ("nice", 1.8),
    ("okay", 0.9),
    ("ok", 1.2),
    ("fine", 0.8),
    ("positive", 2.6),
    ("wonderful", 2.7),
    ("fantastic", 2.6),
    ("perfect", 2.7),
    ("impressive", 2.5),
    ("exciting", 2.2),
    ("excited", 1.4),
    ("thrilled", 2.7),
    ("hope", 1.9),
    ("hopeful", 1.6),
    ("promising", 1.7),
    ("confident", 2.2),
    ("optimistic", 1.3),
    ("upbeat", 1.7),
    ("favorable", 2.1),
    ("benefit", 2.0),
    ("opportunity", 1.8),
    ("success", 2.7),
    ("successful", 2.8),
    ("win", 2.8),
    ("wins", 2.7),
    ("winning", 2.4),
    ("strong", 2.3),
    ("stronger", 2.0),
    ("solid", 1.2),
    ("robust", 1.4),
    ("stable", 1.2),
    ("thriving", 2.0),
    ("improve", 1.9),
    ("improved", 2.1),
    ("improvement", 2.0),
    ("boost", 1.7),
    ("boosts", 1.3),
    // Positive, market
    ("gain", 2.4),
    ("gains", 1.8),
    ("profit", 1.9),
    ("profits", 1.9),
    ("profitable", 1.9),
    ("growth", 1.6),
    ("growing", 1.5),
    ("rally", 1.6),
    ("rallies", 1.5),
    ("soar", 1.9),
    ("soared", 1.9),
    ("soars", 1.9),
    ("surge", 1.4),
    ("surged", 1.4),
    ("bullish", 1.6),
    ("upgrade", 1.3),
    ("upgraded", 1.3),
    ("outperform", 1.6),
    ("recover", 1.3),
    ("recovery", 1.4),
    // Negative, general
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("horrible", -2.5),
    ("poor", -2.1),
    ("weak", -1.9),
    ("weakness", -1.8),
    ("negative", -2.7),
    ("sad", -2.1),
    ("unhappy", -1.8),
    ("angry", -2.3),
    ("hate", -2.7),
    ("fear", -2.2),
    ("fears", -1.8),
    ("worry", -1.9),
    ("worried", -1.2),
    ("concern", -1.0),
    ("concerns", -1.0),
    ("problem", -1.7),
    ("problems", -1.7),
    ("trouble", -1.7),
    ("danger", -2.4),
    ("dangerous", -2.1),
    ("damage", -2.2),
    ("hurt", -2.4),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("disappointing", -2.2),
    ("disappointed", -1.9),
    ("struggle", -1.5),
    ("struggling", -1.8),
    ("warning", -1.4),
    ("fraud", -2.8),
    ("scandal", -2.6),
    ("lawsuit", -1.8),
    ("collapse", -2.2),
    ("crisis", -3.1),
    // Negative, market
    ("loss", -1.3),
    ("losses", -1.7),
    ("lose", -1.7),
    ("losing", -1.6),
    ("lost", -1.3),
    ("decline", -1.1),
    ("declines", -1.0),
    ("declining", -1.3),
    ("drop", -1.1),
    ("drops", -1.0),
    ("plunge", -1.9),
    ("plunges", -1.9),
    ("plunged", -1.9),
    ("crash", -1.7),
    ("slump", -1.8),
    ("selloff", -1.6),
    ("bearish", -1.6),
    ("downgrade", -1.5),
    ("downgraded", -1.5),
    ("recession", -2.3),
    ("risk", -1.1),
    ("risky", -1.4),
    ("uncertainty", -1.4),
    ("volatile", -1.2),
    ("debt", -1.5),
    ("bankrupt", -2.6),
    ("bankruptcy", -2.6),
    ("layoffs", -2.0),
    ("missed", -1.2),
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOSTER_INCR),
    ("completely", BOOSTER_INCR),
    ("considerably", BOOSTER_INCR),
    ("deeply", BOOSTER_INCR),
    ("enormously", BOOSTER_INCR),
    ("entirely", BOOSTER_INCR),
    ("especially", BOOSTER_INCR),
    ("exceptionally", BOOSTER_INCR),
    ("extremely", BOOSTER_INCR),
    ("greatly", BOOSTER_INCR),
    ("highly", BOOSTER_INCR),
    ("hugely", BOOSTER_INCR),
    ("incredibly", BOOSTER_INCR),
    ("particularly", BOOSTER_INCR),
    ("really", BOOSTER_INCR),
    ("remarkably", BOOSTER_INCR),
    ("sharply", BOOSTER_INCR),
    ("significantly", BOOSTER_INCR),
    ("so", BOOSTER_INCR),
    ("substantially", BOOSTER_INCR),
    ("totally", BOOSTER_INCR),
    ("tremendously", BOOSTER_INCR),
    ("very", BOOSTER_INCR),
    ("almost", BOOSTER_DECR),
    ("barely", BOOSTER_DECR),
    ("hardly", BOOSTER_DECR),
    ("marginally", BOOSTER_DECR),
    ("partly", BOOSTER_DECR),
    ("scarcely", BOOSTER_DECR),
    ("slightly", BOOSTER_DECR),
    ("somewhat", BOOSTER_DECR),
];

static VALENCE_TABLE: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| VALENCE.iter().copied().collect());

static BOOSTER_TABLE: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| BOOSTERS.iter().copied().collect());

/// Build the lookup tables now rather than on first use.
pub(crate) fn warm_up() {
    LazyLock::force(&VALENCE_TABLE);
    LazyLock::force(&BOOSTER_TABLE);
}

/// Compound polarity of `text` in `[-1.0, 1.0]`. `0.0` for text with no
/// known words.
#[must_use]
pub fn compound(text: &str) -> f64 {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return 0.0;
    }
    let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
    let caps_differ = caps_differ(&tokens);

    let mut valences = Vec::with_capacity(tokens.len());
    for (i, word) in lowered.iter().enumerate() {
        if BOOSTER_TABLE.contains_key(word.as_str()) {
            valences.push(0.0);
            continue;
        }
        let Some(&base) = VALENCE_TABLE.get(word.as_str()) else {
            valences.push(0.0);
            continue;
        };

        let mut valence = base;
        if caps_differ && is_shouted(tokens[i]) {
            valence += CAPS_INCR.copysign(valence);
        }

        for distance in 1..=3 {
            if i < distance {
                break;
            }
            let j = i - distance;
            if let Some(&boost) = BOOSTER_TABLE.get(lowered[j].as_str()) {
                let mut scalar = if valence < 0.0 { -boost } else { boost };
                if caps_differ && is_shouted(tokens[j]) {
                    scalar += CAPS_INCR.copysign(valence);
                }
                let damping = match distance {
                    1 => 1.0,
                    2 => 0.95,
                    _ => 0.9,
                };
                valence += scalar * damping;
            }
        }

        let window = &lowered[i.saturating_sub(3)..i];
        if window.iter().any(|w| is_negation(w)) {
            valence *= NEGATION_SCALAR;
        }

        valences.push(valence);
    }

    apply_contrast(&lowered, &mut valences);

    let mut sum: f64 = valences.iter().sum();
    let emphasis = punctuation_emphasis(text);
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }

    normalize(sum)
}

/// Positive at `>= 0.05`, Negative at `<= -0.05`, otherwise Neutral.
#[must_use]
pub fn label_for(score: f64) -> Label {
    if score >= NEUTRAL_BAND {
        Label::Positive
    } else if score <= -NEUTRAL_BAND {
        Label::Negative
    } else {
        Label::Neutral
    }
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

/// At least one shouted word alongside at least one normal word.
fn caps_differ(tokens: &[&str]) -> bool {
    let shouted = tokens.iter().filter(|t| is_shouted(t)).count();
    shouted > 0 && shouted < tokens.len()
}

/// Two or more letters, all uppercase. Single letters like "I" don't count.
fn is_shouted(token: &str) -> bool {
    let letters: Vec<char> = token.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|c| c.is_uppercase())
}

/// Halve sentiment before the first "but" and raise it by half after.
fn apply_contrast(lowered: &[String], valences: &mut [f64]) {
    let Some(pivot) = lowered.iter().position(|w| w == "but") else {
        return;
    };
    for (i, valence) in valences.iter_mut().enumerate() {
        if i < pivot {
            *valence *= 0.5;
        } else if i > pivot {
            *valence *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    #[allow(clippy::cast_precision_loss)]
    let mut emphasis = exclamations as f64 * EXCLAMATION_INCR;

    let questions = text.matches('?').count();
    if questions > 1 {
        #[allow(clippy::cast_precision_loss)]
        let q = if questions <= 3 {
            questions as f64 * QUESTION_INCR
        } else {
            QUESTION_CAP
        };
        emphasis += q;
    }
    emphasis
}
