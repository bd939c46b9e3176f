//! Core data models for books and search operations.

mod document;
mod search;

pub use document::{Document, DocumentBuilder, Favorite, ProviderKind};
pub use search::{
    QueryBuilder, SearchMode, SearchQuery, SearchResultSet, SortPreference, YearRange,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
