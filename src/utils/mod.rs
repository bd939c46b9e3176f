//! Utility modules shared by the providers.
//!
//! - [`HttpClient`]: shared reqwest client with timeouts and JSON decoding
//!   that maps failures onto [`ProviderError`](crate::sources::ProviderError)
//!
//! # HTTP Client
//!
//! ```rust,no_run
//! use book_finder::utils::HttpClient;
//! use url::Url;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let url = Url::parse("https://openlibrary.org/search.json?q=dune")?;
//! let body: serde_json::Value = client.get_json(url, "Open Library").await?;
//! # Ok(())
//! # }
//! ```

mod http;

pub use http::{default_user_agent, HttpClient};
