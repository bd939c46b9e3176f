//! Book search providers behind a common trait.
//!
//! This module defines the [`Provider`] trait that every search backend
//! implements, the two real backends, and the [`Dispatcher`] that tries the
//! primary backend and falls back to the secondary one.
//!
//! # Providers
//!
//! - [`OpenLibraryProvider`] - Open Library `search.json` (primary)
//! - [`GoogleBooksProvider`] - Google Books `volumes` (fallback)
//! - [`MockProvider`] - canned responses for tests
//!
//! Every provider returns documents already filtered to the query's year
//! bounds and ordered by its sort preference; see [`normalize`].
//!
//! # Fallback
//!
//! ```rust,no_run
//! use book_finder::models::{QueryBuilder, SearchMode, SortPreference};
//! use book_finder::sources::Dispatcher;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dispatcher = Dispatcher::default();
//! let query = QueryBuilder::new("dune")
//!     .mode(SearchMode::Title)
//!     .year_start(Some(2000))
//!     .year_end(Some(2020))
//!     .sort(SortPreference::Old)
//!     .build()
//!     .expect("non-empty query");
//!
//! let dispatch = dispatcher.search(&query).await?;
//! println!("{} answered with {} books", dispatch.provider, dispatch.result.documents.len());
//! # Ok(())
//! # }
//! ```

mod dispatcher;
mod google_books;
pub mod mock;
pub mod normalize;
mod open_library;

pub use dispatcher::{Dispatch, DispatchError, Dispatcher};
pub use google_books::{GoogleBooksProvider, GOOGLE_BOOKS_API_BASE};
pub use mock::MockProvider;
pub use open_library::{OpenLibraryProvider, OPEN_LIBRARY_API_BASE};

use crate::models::{ProviderKind, SearchQuery, SearchResultSet};
use async_trait::async_trait;

/// The Provider trait defines the interface for all book search backends.
///
/// An implementation issues exactly one network call per [`Provider::search`],
/// fails on a non-success status, maps the native response into
/// [`Document`](crate::models::Document)s and runs them through
/// [`normalize::normalize`] before returning.
#[async_trait]
pub trait Provider: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this provider (e.g. "openlibrary")
    fn id(&self) -> String {
        self.kind().id().to_string()
    }

    /// Which provider this is; used to tag result sets
    fn kind(&self) -> ProviderKind;

    /// Human-readable name of this provider
    fn name(&self) -> String {
        self.kind().name().to_string()
    }

    /// Search for books matching the query
    async fn search(&self, query: &SearchQuery) -> Result<SearchResultSet, ProviderError>;
}

/// Errors that can occur when calling a provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered with a non-success HTTP status
    #[error("{provider} returned HTTP status {status}")]
    Transport { provider: String, status: u16 },

    /// Connection, timeout or body read failure
    #[error("Network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    /// Whether this error came from a non-success HTTP status
    pub fn is_transport(&self) -> bool {
        matches!(self, ProviderError::Transport { .. })
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Parse(format!("JSON: {}", err))
    }
}

impl From<url::ParseError> for ProviderError {
    fn from(err: url::ParseError) -> Self {
        ProviderError::InvalidRequest(format!("URL: {}", err))
    }
}
