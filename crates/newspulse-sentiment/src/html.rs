//! HTML text extraction helpers.

use std::sync::LazyLock;

use scraper::{Html, Selector};

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid paragraph selector"));

/// Text of every `<p>` element, joined with single spaces and trimmed.
///
/// Text inside a paragraph is concatenated as-is, including whitespace
/// between its child nodes.
pub(crate) fn paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let paragraphs: Vec<String> = document
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>())
        .collect();
    paragraphs.join(" ").trim().to_string()
}

/// Strip tags from an HTML fragment, keeping each non-blank text node
/// trimmed and separated by one space. Entities are decoded.
pub(crate) fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
