//! RSS 2.0 item parsing.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::SentimentError;
use crate::html::strip_html;

/// One `<item>` from a syndication feed, with optional fields resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    /// `<title>`, or empty when the item has none.
    pub title: String,
    pub link: String,
    /// `<pubDate>` verbatim, or empty.
    pub published: String,
    /// `<description>` with HTML stripped; `None` when absent or blank.
    pub summary: Option<String>,
}

impl FeedEntry {
    /// `"{title} {summary}"` trimmed, used as the last-resort article body.
    #[must_use]
    pub fn combined_text(&self) -> String {
        let summary = self.summary.as_deref().unwrap_or("");
        format!("{} {summary}", self.title).trim().to_string()
    }
}

/// Parse an RSS XML feed into at most `max_entries` [`FeedEntry`] values.
///
/// Items without a `<link>` are skipped. Text and CDATA inside
/// `<description>` are accumulated across nested tags before stripping.
///
/// # Errors
///
/// Returns [`SentimentError::Xml`] if the XML is malformed.
pub(crate) fn parse_rss_feed(
    xml: &str,
    max_entries: usize,
) -> Result<Vec<FeedEntry>, SentimentError> {
    let mut entries = Vec::new();
    if max_entries == 0 {
        return Ok(entries);
    }

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_item = false;
    let mut in_description = false;
    let mut current_tag = String::new();
    let mut title = String::new();
    let mut link = String::new();
    let mut published = String::new();
    let mut description = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                if name == "item" {
                    in_item = true;
                    in_description = false;
                    title.clear();
                    link.clear();
                    published.clear();
                    description.clear();
                } else if name == "description" && in_item {
                    in_description = true;
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let raw = e.name();
                let name = std::str::from_utf8(raw.as_ref()).unwrap_or("");
                if name == "description" {
                    in_description = false;
                }
                if name == "item" && in_item {
                    in_item = false;
                    if link.is_empty() {
                        tracing::debug!(title = %title, "skipping feed item without link");
                        continue;
                    }
                    let summary = strip_html(&description);
                    entries.push(FeedEntry {
                        title: title.trim().to_string(),
                        link: link.trim().to_string(),
                        published: published.trim().to_string(),
                        summary: (!summary.is_empty()).then_some(summary),
                    });
                    if entries.len() >= max_entries {
                        break;
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    if in_description {
                        if !description.is_empty() {
                            description.push(' ');
                        }
                        description.push_str(&text);
                    } else {
                        assign_field(&current_tag, text, &mut title, &mut link, &mut published);
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    if in_description {
                        if !description.is_empty() {
                            description.push(' ');
                        }
                        description.push_str(&text);
                    } else {
                        assign_field(&current_tag, text, &mut title, &mut link, &mut published);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SentimentError::Xml(e)),
            _ => {}
        }
    }

    Ok(entries)
}

fn assign_field(
    tag: &str,
    text: String,
    title: &mut String,
    link: &mut String,
    published: &mut String,
) {
    match tag {
        "title" => *title = text,
        "link" => *link = text,
        "pubDate" => *published = text,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>"Tesla stock news" - Google News</title>
    <item>
      <title>Tesla shares rally after delivery beat - Reuters</title>
      <link>https://news.example.com/articles/tesla-rally</link>
      <guid isPermaLink="false">CBMiXGh0dHBz</guid>
      <pubDate>Mon, 06 Jan 2025 14:30:00 GMT</pubDate>
      <description>&lt;a href="https://news.example.com/articles/tesla-rally"&gt;Tesla shares rally after delivery beat&lt;/a&gt;&amp;nbsp;&amp;nbsp;&lt;font color="#6f6f6f"&gt;Reuters&lt;/font&gt;</description>
      <source url="https://www.reuters.com">Reuters</source>
    </item>
    <item>
      <title><![CDATA[Analysts cut targets & warn on margins]]></title>
      <link>https://news.example.com/articles/targets-cut</link>
      <pubDate>Tue, 07 Jan 2025 09:00:00 GMT</pubDate>
      <description><![CDATA[<p>Margins are <b>under pressure</b>.</p>]]></description>
    </item>
    <item>
      <title>No description here</title>
      <link>https://news.example.com/articles/bare</link>
    </item>
  </channel>
</rss>"##;

    #[test]
    fn parses_items_with_all_fields() {
        let entries = parse_rss_feed(SAMPLE_RSS, 10).expect("should parse valid RSS");
        assert_eq!(entries.len(), 3, "expected 3 entries, got {}", entries.len());

        let first = &entries[0];
        assert_eq!(first.title, "Tesla shares rally after delivery beat - Reuters");
        assert_eq!(first.link, "https://news.example.com/articles/tesla-rally");
        assert_eq!(first.published, "Mon, 06 Jan 2025 14:30:00 GMT");
        assert_eq!(
            first.summary.as_deref(),
            Some("Tesla shares rally after delivery beat Reuters")
        );
    }

    #[test]
    fn hex_colored_source_markup_is_stripped() {
        let entries = parse_rss_feed(SAMPLE_RSS, 1).unwrap();
        let summary = entries[0].summary.as_deref().unwrap();
        assert!(!summary.contains("6f6f6f"), "summary kept markup: {summary}");
        assert!(summary.ends_with("Reuters"));
    }

    #[test]
    fn cdata_title_and_description_are_read() {
        let entries = parse_rss_feed(SAMPLE_RSS, 10).unwrap();
        assert_eq!(entries[1].title, "Analysts cut targets & warn on margins");
        assert_eq!(
            entries[1].summary.as_deref(),
            Some("Margins are under pressure .")
        );
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let entries = parse_rss_feed(SAMPLE_RSS, 10).unwrap();
        assert_eq!(entries[2].published, "");
        assert!(entries[2].summary.is_none());
    }

    #[test]
    fn source_element_does_not_overwrite_fields() {
        let entries = parse_rss_feed(SAMPLE_RSS, 10).unwrap();
        assert_ne!(entries[0].title, "Reuters");
        assert_ne!(entries[0].link, "https://www.reuters.com");
    }

    #[test]
    fn stops_after_max_entries() {
        let entries = parse_rss_feed(SAMPLE_RSS, 2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].link, "https://news.example.com/articles/targets-cut");
    }

    #[test]
    fn zero_limit_returns_nothing() {
        assert!(parse_rss_feed(SAMPLE_RSS, 0).unwrap().is_empty());
    }

    #[test]
    fn items_without_link_are_skipped() {
        let xml = r#"<rss><channel>
            <item><title>Orphan</title></item>
            <item><title>Kept</title><link>https://example.com/kept</link></item>
        </channel></rss>"#;
        let entries = parse_rss_feed(xml, 10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Kept");
    }

    #[test]
    fn empty_feed_returns_empty_vec() {
        let xml = r#"<?xml version="1.0"?><rss version="2.0"><channel></channel></rss>"#;
        let entries = parse_rss_feed(xml, 5).expect("should parse empty RSS");
        assert!(entries.is_empty());
    }

    #[test]
    fn malformed_xml_is_handled() {
        let xml = "<rss><channel><item><title>Unclosed";
        match parse_rss_feed(xml, 5) {
            Ok(entries) => assert!(entries.is_empty()),
            Err(SentimentError::Xml(_)) => {}
            Err(e) => panic!("unexpected error type: {e}"),
        }
    }

    #[test]
    fn combined_text_joins_title_and_summary() {
        let entry = FeedEntry {
            title: "Title".to_string(),
            link: "https://example.com".to_string(),
            published: String::new(),
            summary: Some("Summary text".to_string()),
        };
        assert_eq!(entry.combined_text(), "Title Summary text");

        let bare = FeedEntry {
            summary: None,
            ..entry
        };
        assert_eq!(bare.combined_text(), "Title");
    }
}
