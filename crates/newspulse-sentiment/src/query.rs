//! Topic to search-query expansion.

/// Suffixes appended to the topic, in output order.
pub const QUERY_SUFFIXES: [&str; 6] = [
    " stock news",
    " market analysis",
    " financial news",
    " economic outlook",
    " investment trends",
    " stock market updates",
];

/// Expand a topic into one search query per suffix.
///
/// The topic is used verbatim: no trimming, case folding, or deduplication.
/// An empty topic yields the bare suffixes.
#[must_use]
pub fn expand(topic: &str) -> Vec<String> {
    QUERY_SUFFIXES
        .iter()
        .map(|suffix| format!("{topic}{suffix}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_to_six_queries_in_suffix_order() {
        let queries = expand("Tesla");
        assert_eq!(
            queries,
            vec![
                "Tesla stock news",
                "Tesla market analysis",
                "Tesla financial news",
                "Tesla economic outlook",
                "Tesla investment trends",
                "Tesla stock market updates",
            ]
        );
    }

    #[test]
    fn expansion_is_deterministic() {
        assert_eq!(expand("NVDA"), expand("NVDA"));
    }

    #[test]
    fn empty_topic_yields_bare_suffixes() {
        let queries = expand("");
        assert_eq!(queries.len(), 6);
        for (query, suffix) in queries.iter().zip(QUERY_SUFFIXES) {
            assert_eq!(query, suffix);
        }
    }

    #[test]
    fn topic_is_not_normalized() {
        let queries = expand("  apple ");
        assert_eq!(queries[0], "  apple  stock news");
    }
}
