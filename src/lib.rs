//! # book-finder
//!
//! Book search over Open Library with Google Books as a fallback, plus a
//! persistent favorites list.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Document, Favorite, SearchQuery, etc.)
//! - [`sources`]: Search providers and the primary/fallback [`Dispatcher`]
//! - [`favorites`]: Favorites list and its persistence backends
//! - [`session`]: Last-committed-query-wins coordination for interactive use
//! - [`utils`]: HTTP client
//! - [`config`]: Configuration management
//! - [`ui`]: Terminal output helpers

pub mod config;
pub mod favorites;
pub mod models;
pub mod session;
pub mod sources;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use models::{Document, Favorite, QueryBuilder, SearchQuery, SearchResultSet};
pub use sources::{Dispatcher, Provider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
