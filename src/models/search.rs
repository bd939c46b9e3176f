//! Search request and response models.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::{Document, ProviderKind};

/// Default number of documents per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page size any provider serves (the Google Books `maxResults` cap)
pub const MAX_PAGE_SIZE: usize = 40;

/// Which field the free-text query is matched against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    All,
    Title,
    Author,
    Subject,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::All => "all",
            SearchMode::Title => "title",
            SearchMode::Author => "author",
            SearchMode::Subject => "subject",
        }
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(SearchMode::All),
            "title" => Ok(SearchMode::Title),
            "author" => Ok(SearchMode::Author),
            "subject" => Ok(SearchMode::Subject),
            other => Err(format!("unknown search mode: {}", other)),
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result ordering requested by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortPreference {
    /// Keep provider order
    #[default]
    Relevance,
    /// Newest first
    New,
    /// Oldest first
    Old,
}

impl SortPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortPreference::Relevance => "relevance",
            SortPreference::New => "new",
            SortPreference::Old => "old",
        }
    }
}

impl FromStr for SortPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(SortPreference::Relevance),
            "new" => Ok(SortPreference::New),
            "old" => Ok(SortPreference::Old),
            other => Err(format!("unknown sort preference: {}", other)),
        }
    }
}

impl std::fmt::Display for SortPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive publication-year bounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: Option<i32>,
    pub end: Option<i32>,
}

impl YearRange {
    pub fn new(start: Option<i32>, end: Option<i32>) -> Self {
        Self { start, end }
    }

    /// True when neither bound is set
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether a document year passes the bounds.
    ///
    /// A missing year fails any lower bound and passes any upper bound, so
    /// undated documents are dropped as soon as `start` is set.
    pub fn contains(&self, year: Option<i32>) -> bool {
        if let Some(start) = self.start {
            match year {
                Some(y) if y >= start => {}
                _ => return false,
            }
        }
        if let (Some(end), Some(y)) = (self.end, year) {
            if y > end {
                return false;
            }
        }
        true
    }
}

/// A committed search, ready to be turned into provider requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Trimmed, non-empty query text
    pub text: String,

    /// Field the text is matched against
    pub mode: SearchMode,

    /// Inclusive year bounds applied client-side
    pub years: YearRange,

    /// 1-based page number
    pub page: usize,

    /// Documents per page
    pub page_size: usize,

    /// Requested ordering
    pub sort: SortPreference,
}

/// Builder that turns raw user input into a [`SearchQuery`]
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    text: String,
    mode: SearchMode,
    years: YearRange,
    page: usize,
    page_size: usize,
    sort: SortPreference,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self {
            text: String::new(),
            mode: SearchMode::default(),
            years: YearRange::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort: SortPreference::default(),
        }
    }
}

impl QueryBuilder {
    /// Start a builder from free-text input
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set search mode
    pub fn mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set lower year bound
    pub fn year_start(mut self, year: Option<i32>) -> Self {
        self.years.start = year;
        self
    }

    /// Set upper year bound
    pub fn year_end(mut self, year: Option<i32>) -> Self {
        self.years.end = year;
        self
    }

    /// Set page number (1-based)
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Set page size (clamped to `1..=MAX_PAGE_SIZE` on build)
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Set sort preference
    pub fn sort(mut self, sort: SortPreference) -> Self {
        self.sort = sort;
        self
    }

    /// Build the query, or `None` when the trimmed text is empty.
    pub fn build(self) -> Option<SearchQuery> {
        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }

        Some(SearchQuery {
            text: text.to_string(),
            mode: self.mode,
            years: self.years,
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, MAX_PAGE_SIZE),
            sort: self.sort,
        })
    }
}

/// One page of normalized search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultSet {
    /// Documents on the requested page, after filtering and sorting
    pub documents: Vec<Document>,

    /// Provider's estimate of total matches
    pub total: usize,

    /// Provider that produced this page
    pub provider: ProviderKind,

    /// 1-based page number
    pub page: usize,

    /// Requested page size
    pub page_size: usize,
}

impl SearchResultSet {
    /// Create a new result set
    pub fn new(documents: Vec<Document>, total: usize, provider: ProviderKind) -> Self {
        Self {
            documents,
            total,
            provider,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Record which page this set represents
    pub fn paged(mut self, page: usize, page_size: usize) -> Self {
        self.page = page.max(1);
        self.page_size = page_size.max(1);
        self
    }

    /// Number of pages implied by the total estimate
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    /// Whether a later page exists
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Look up a document on this page by key
    pub fn find(&self, key: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.key == key)
    }
}
