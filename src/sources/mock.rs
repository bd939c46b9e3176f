//! Mock provider for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::{Document, DocumentBuilder, ProviderKind, SearchQuery, SearchResultSet};
use crate::sources::{normalize, Provider, ProviderError};

/// A provider that returns predefined documents or a predefined error.
///
/// Canned documents go through the same normalization as the real
/// providers, so year bounds and sort preferences still apply.
#[derive(Debug)]
pub struct MockProvider {
    kind: ProviderKind,
    outcome: Mutex<Result<Vec<Document>, ProviderError>>,
    total: Mutex<Option<usize>>,
    calls: AtomicUsize,
    last_query: Mutex<Option<SearchQuery>>,
}

impl MockProvider {
    /// Create a mock that answers with no documents
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            outcome: Mutex::new(Ok(Vec::new())),
            total: Mutex::new(None),
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    /// Create a mock that answers with the given documents
    pub fn with_documents(kind: ProviderKind, documents: Vec<Document>) -> Self {
        let mock = Self::new(kind);
        mock.set_documents(documents);
        mock
    }

    /// Create a mock that always fails with the given error
    pub fn failing(kind: ProviderKind, error: ProviderError) -> Self {
        let mock = Self::new(kind);
        mock.set_error(error);
        mock
    }

    /// Replace the canned documents
    pub fn set_documents(&self, documents: Vec<Document>) {
        *lock(&self.outcome) = Ok(documents);
    }

    /// Make subsequent searches fail
    pub fn set_error(&self, error: ProviderError) {
        *lock(&self.outcome) = Err(error);
    }

    /// Override the reported total (defaults to the document count)
    pub fn set_total(&self, total: usize) {
        *lock(&self.total) = Some(total);
    }

    /// Number of times `search` has been called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent query this mock received
    pub fn last_query(&self) -> Option<SearchQuery> {
        lock(&self.last_query).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl Provider for MockProvider {
    fn kind(&self) -> ProviderKind {
        self.kind.clone()
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResultSet, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *lock(&self.last_query) = Some(query.clone());

        let documents = lock(&self.outcome).clone()?;
        let total = lock(&self.total).unwrap_or(documents.len());
        let documents = normalize::normalize(documents, query);

        Ok(SearchResultSet::new(documents, total, self.kind.clone())
            .paged(query.page, query.page_size))
    }
}

/// Helper function to create a dated document for testing.
pub fn make_document(key: &str, title: &str, year: Option<i32>) -> Document {
    let builder = DocumentBuilder::new(key, title).authors([format!("Author of {}", title)]);
    match year {
        Some(y) => builder.year(y).build(),
        None => builder.build(),
    }
}
