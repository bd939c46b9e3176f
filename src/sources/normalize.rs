//! Client-side filtering and ordering shared by every provider.
//!
//! Neither backend reliably honours year bounds or date ordering, so both
//! adapters pass their mapped documents through [`normalize`].

use std::collections::HashSet;

use crate::models::{Document, SearchQuery, SortPreference, YearRange};

/// Apply key de-duplication, the year filter and the sort preference.
pub fn normalize(documents: Vec<Document>, query: &SearchQuery) -> Vec<Document> {
    let mut documents = filter_by_years(dedup_by_key(documents), &query.years);
    sort_documents(&mut documents, query.sort);
    documents
}

/// Keep only documents whose year passes the bounds.
///
/// Undated documents are dropped whenever a lower bound is set and kept
/// otherwise.
pub fn filter_by_years(documents: Vec<Document>, years: &YearRange) -> Vec<Document> {
    if years.is_unbounded() {
        return documents;
    }
    documents
        .into_iter()
        .filter(|doc| years.contains(doc.first_publish_year))
        .collect()
}

/// Stable sort by year; missing years count as 0. Relevance is a no-op.
pub fn sort_documents(documents: &mut [Document], sort: SortPreference) {
    match sort {
        SortPreference::Relevance => {}
        SortPreference::New => documents.sort_by(|a, b| b.sort_year().cmp(&a.sort_year())),
        SortPreference::Old => documents.sort_by_key(Document::sort_year),
    }
}

/// Drop later documents that repeat an earlier key.
pub fn dedup_by_key(documents: Vec<Document>) -> Vec<Document> {
    let mut seen = HashSet::new();
    documents
        .into_iter()
        .filter(|doc| seen.insert(doc.key.clone()))
        .collect()
}

/// Year from a date string such as `2004-08-01` or `1965`.
///
/// Only the leading four characters are considered.
pub fn year_from_date(date: &str) -> Option<i32> {
    let head: String = date.trim().chars().take(4).collect();
    if head.len() != 4 || !head.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    head.parse().ok()
}

/// Rewrite an `http://` image URL to `https://`.
pub fn upgrade_to_https(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}
