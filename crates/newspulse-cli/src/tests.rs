use clap::Parser;
use newspulse_core::{Article, Classification, DetailedResult, Label, Report, Summary};
use newspulse_sentiment::Method;

use super::*;

fn report() -> Report {
    let article = |title: &str| Article {
        title: title.to_string(),
        link: format!("https://example.com/{title}"),
        published: "Mon, 06 Jan 2025 14:30:00 GMT".to_string(),
        content: String::new(),
    };
    let detailed = vec![
        DetailedResult::new(
            &article("up"),
            Classification {
                label: Label::Positive,
                score: 0.6369,
            },
        ),
        DetailedResult::new(
            &article("down"),
            Classification {
                label: Label::Negative,
                score: -0.5423,
            },
        ),
        DetailedResult::degraded(&article("flat"), "model returned status 503"),
    ];
    Report {
        total: 3,
        summary: Summary::from_counts(1, 1, 1),
        detailed,
    }
}

#[test]
fn parses_analyze_with_defaults() {
    let cli = Cli::try_parse_from(["newspulse", "analyze", "Tesla"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Analyze {
            ref topic,
            method: Method::Lexicon,
            limit: None,
            json: false,
        } if topic == "Tesla"
    ));
}

#[test]
fn parses_analyze_with_options() {
    let cli = Cli::try_parse_from([
        "newspulse", "analyze", "Apple", "--method", "finbert", "--limit", "3", "--json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Analyze {
            method: Method::Neural,
            limit: Some(3),
            json: true,
            ..
        }
    ));
}

#[test]
fn parses_score_with_method_alias() {
    let cli =
        Cli::try_parse_from(["newspulse", "score", "great quarter", "--method", "heuristic"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Score {
            ref text,
            method: Method::Heuristic,
        } if text == "great quarter"
    ));
}

#[test]
fn rejects_unknown_method() {
    let err = Cli::try_parse_from(["newspulse", "score", "text", "--method", "bogus"]);
    assert!(err.is_err());
}

#[test]
fn command_is_required() {
    assert!(Cli::try_parse_from(["newspulse"]).is_err());
}

#[test]
fn summary_lists_every_label_with_two_decimals() {
    let text = render::render_summary(&report()).unwrap();
    assert!(text.contains("Total Articles Analyzed: 3"));
    assert!(text.contains("Positive: 1 articles (33.33%)"));
    assert!(text.contains("Negative: 1 articles (33.33%)"));
    assert!(text.contains("Neutral: 1 articles (33.33%)"));
}

#[test]
fn empty_report_renders_zero_percentages() {
    let empty = Report {
        total: 0,
        summary: Summary::from_counts(0, 0, 0),
        detailed: Vec::new(),
    };
    let text = render::render_report(&empty).unwrap();
    assert!(text.contains("Total Articles Analyzed: 0"));
    assert!(text.contains("Positive: 0 articles (0.00%)"));
    assert!(!text.contains("Title:"));
}

#[test]
fn detailed_entries_follow_the_summary() {
    let text = render::render_report(&report()).unwrap();
    let summary_end = text.find("Neutral: 1").unwrap();
    let first_title = text.find("Title: up").unwrap();
    assert!(first_title > summary_end);
    assert!(text.contains("Sentiment: Negative (score -0.5423)"));
    assert!(text.contains("Error: model returned status 503"));
}

#[test]
fn classification_shows_label_and_score() {
    let rendered = render::render_classification(&Classification {
        label: Label::Positive,
        score: 0.5,
    });
    assert_eq!(rendered, "Positive (0.5000)");
}
