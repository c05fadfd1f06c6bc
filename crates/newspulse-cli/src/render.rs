//! Plain-text rendering of reports for the terminal.

use std::fmt::{self, Write as _};

use newspulse_core::{Classification, Label, Report};

const RULE: &str = "--------------------------------------------";

/// Summary block followed by one entry per article.
pub(crate) fn render_report(report: &Report) -> Result<String, fmt::Error> {
    let mut out = render_summary(report)?;
    for result in &report.detailed {
        writeln!(out, "Title: {}", result.title)?;
        writeln!(out, "Link: {}", result.link)?;
        writeln!(out, "Published: {}", result.published)?;
        writeln!(out, "Sentiment: {} (score {:.4})", result.label, result.score)?;
        if let Some(error) = &result.error {
            writeln!(out, "Error: {error}")?;
        }
        writeln!(out, "{RULE}")?;
    }
    Ok(out)
}

pub(crate) fn render_summary(report: &Report) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "--------- Market Sentiment Summary ---------")?;
    writeln!(out, "Total Articles Analyzed: {}", report.total)?;
    for label in Label::ALL {
        writeln!(
            out,
            "{label}: {} articles ({:.2}%)",
            report.summary.count(label),
            report.summary.percentage(label)
        )?;
    }
    writeln!(out, "{RULE}")?;
    Ok(out)
}

pub(crate) fn render_classification(classification: &Classification) -> String {
    format!("{} ({:.4})", classification.label, classification.score)
}
