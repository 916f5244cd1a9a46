//! Keyword-based clause finder
//!
//! The text is split on every literal `.`; there is no smarter sentence
//! detection. Matches are emitted keyword by keyword (all segments for the
//! first keyword, then all for the second, ...), so the output is grouped by
//! keyword rather than in document order. A segment that matches two
//! keywords is emitted twice.

use shared_types::Clause;

use crate::keywords::contains_keyword;

/// Find every `(segment, keyword)` match in `raw_text`
pub fn find_clauses<K: AsRef<str>>(raw_text: &str, keywords: &[K]) -> Vec<Clause> {
    let segments: Vec<&str> = raw_text
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut clauses = Vec::new();
    for keyword in keywords {
        let keyword = keyword.as_ref();
        for segment in &segments {
            if contains_keyword(segment, keyword) {
                clauses.push(Clause::unclassified(*segment, keyword));
            }
        }
    }

    tracing::debug!(
        segments = segments.len(),
        keywords = keywords.len(),
        matches = clauses.len(),
        "clause scan complete"
    );

    clauses
}
