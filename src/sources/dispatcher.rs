//! Primary/fallback search dispatch.

use std::sync::Arc;

use super::{GoogleBooksProvider, OpenLibraryProvider, Provider, ProviderError};
use crate::config::Config;
use crate::models::{ProviderKind, SearchQuery, SearchResultSet};
use crate::utils::HttpClient;

/// Outcome of a successful dispatch
#[derive(Debug, Clone)]
pub struct Dispatch {
    /// The page of documents
    pub result: SearchResultSet,

    /// Provider that produced `result`
    pub provider: ProviderKind,

    /// Why the primary provider was skipped, when the fallback answered
    pub primary_error: Option<ProviderError>,
}

impl Dispatch {
    /// Whether the fallback provider produced this result
    pub fn used_fallback(&self) -> bool {
        self.primary_error.is_some()
    }
}

/// Failure of both dispatch steps
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The primary failed and then the fallback failed too. Only the
    /// fallback error is shown to users.
    #[error("{fallback}")]
    Fallback {
        primary: ProviderError,
        fallback: ProviderError,
    },
}

impl DispatchError {
    /// The error reported by the fallback provider
    pub fn fallback_error(&self) -> &ProviderError {
        match self {
            DispatchError::Fallback { fallback, .. } => fallback,
        }
    }
}

/// Two-step search pipeline: primary provider, then fallback.
///
/// The fallback is called only after the primary has failed, and at most
/// once. Results are never merged.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    primary: Arc<dyn Provider>,
    fallback: Arc<dyn Provider>,
}

impl Dispatcher {
    /// Create a dispatcher over any two providers
    pub fn new(primary: Arc<dyn Provider>, fallback: Arc<dyn Provider>) -> Self {
        Self { primary, fallback }
    }

    /// Open Library first, Google Books second, as configured
    pub fn from_config(config: &Config) -> Self {
        let client = HttpClient::from_config(&config.http);
        let primary = OpenLibraryProvider::with_base_url(
            client.clone(),
            config.providers.open_library_url.clone(),
        );
        let fallback =
            GoogleBooksProvider::with_base_url(client, config.providers.google_books_url.clone())
                .api_key(config.providers.google_books_api_key.clone());

        Self::new(Arc::new(primary), Arc::new(fallback))
    }

    /// The primary provider
    pub fn primary(&self) -> &Arc<dyn Provider> {
        &self.primary
    }

    /// Run the query against the primary, falling back once on any error.
    pub async fn search(&self, query: &SearchQuery) -> Result<Dispatch, DispatchError> {
        let primary_error = match self.primary.search(query).await {
            Ok(result) => return Ok(Self::tag(result, self.primary.kind(), None)),
            Err(err) => err,
        };

        tracing::warn!(
            provider = %self.primary.id(),
            error = %primary_error,
            fallback = %self.fallback.id(),
            "primary provider failed, using fallback"
        );

        match self.fallback.search(query).await {
            Ok(result) => Ok(Self::tag(result, self.fallback.kind(), Some(primary_error))),
            Err(fallback) => {
                tracing::error!(provider = %self.fallback.id(), error = %fallback, "fallback provider failed");
                Err(DispatchError::Fallback {
                    primary: primary_error,
                    fallback,
                })
            }
        }
    }

    fn tag(
        mut result: SearchResultSet,
        provider: ProviderKind,
        primary_error: Option<ProviderError>,
    ) -> Dispatch {
        result.provider = provider.clone();
        Dispatch {
            result,
            provider,
            primary_error,
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
