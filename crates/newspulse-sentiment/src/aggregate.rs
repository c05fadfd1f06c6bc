//! Label tallies and percentages over classified articles.

use newspulse_core::{DetailedResult, Label, Report, Summary};

/// Count labels in one pass and wrap the results into a [`Report`].
///
/// `detailed` is the input, unchanged. With no results every percentage
/// is `0.0`.
#[must_use]
pub fn aggregate(results: Vec<DetailedResult>) -> Report {
    let (mut positive, mut negative, mut neutral) = (0usize, 0usize, 0usize);
    for result in &results {
        match result.label {
            Label::Positive => positive += 1,
            Label::Negative => negative += 1,
            Label::Neutral => neutral += 1,
        }
    }

    Report {
        total: results.len(),
        summary: Summary::from_counts(positive, negative, neutral),
        detailed: results,
    }
}
