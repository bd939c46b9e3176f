//! Open Library search provider.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::models::{
    Document, DocumentBuilder, ProviderKind, SearchMode, SearchQuery, SearchResultSet,
    SortPreference,
};
use crate::sources::{normalize, Provider, ProviderError};
use crate::utils::HttpClient;

pub const OPEN_LIBRARY_API_BASE: &str = "https://openlibrary.org";
const OPEN_LIBRARY_COVERS_BASE: &str = "https://covers.openlibrary.org/b/id";

/// Fields requested from `search.json`; keeps the payload small
const SEARCH_FIELDS: &str =
    "key,title,author_name,cover_i,first_publish_year,edition_count,subject";

/// Open Library provider
///
/// Uses the `search.json` endpoint with a mode-specific query parameter.
#[derive(Debug, Clone)]
pub struct OpenLibraryProvider {
    client: HttpClient,
    base_url: String,
}

impl OpenLibraryProvider {
    /// Create a provider against the public Open Library API
    pub fn new() -> Self {
        Self::with_base_url(HttpClient::new(), OPEN_LIBRARY_API_BASE)
    }

    /// Create a provider against a custom base URL
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build the request URL for a query
    pub fn build_url(&self, query: &SearchQuery) -> Result<Url, ProviderError> {
        let field = match query.mode {
            SearchMode::All => "q",
            SearchMode::Title => "title",
            SearchMode::Author => "author",
            SearchMode::Subject => "subject",
        };

        let mut params: Vec<(&str, String)> = vec![
            (field, query.text.clone()),
            ("page", query.page.to_string()),
            ("limit", query.page_size.to_string()),
            ("fields", SEARCH_FIELDS.to_string()),
        ];

        // Results are sorted again locally after the response
        if query.sort != SortPreference::Relevance {
            params.push(("sort", query.sort.as_str().to_string()));
        }

        let endpoint = format!("{}/search.json", self.base_url.trim_end_matches('/'));
        Ok(Url::parse_with_params(&endpoint, &params)?)
    }

    /// Map one Open Library doc into a [`Document`]
    fn parse_doc(doc: OLDoc) -> Document {
        let mut builder = DocumentBuilder::new(doc.key, doc.title.unwrap_or_default())
            .authors(doc.author_name.unwrap_or_default());

        if let Some(cover_id) = doc.cover_i {
            builder = builder.cover_url(cover_url(cover_id));
        }
        if let Some(year) = doc.first_publish_year {
            builder = builder.year(year);
        }
        if let Some(count) = doc.edition_count {
            builder = builder.edition_count(count);
        }
        if let Some(subjects) = doc.subject {
            builder = builder.subjects(subjects);
        }

        builder.build()
    }
}

impl Default for OpenLibraryProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Medium-size cover image URL for an Open Library cover id
pub fn cover_url(cover_id: i64) -> String {
    format!("{}/{}-M.jpg", OPEN_LIBRARY_COVERS_BASE, cover_id)
}

#[async_trait]
impl Provider for OpenLibraryProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenLibrary
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResultSet, ProviderError> {
        let url = self.build_url(query)?;
        let data: SearchResponse = self.client.get_json(url, "Open Library").await?;

        let documents: Vec<Document> = data.docs.into_iter().map(Self::parse_doc).collect();
        let fetched = documents.len();
        let documents = normalize::normalize(documents, query);

        tracing::debug!(
            fetched,
            kept = documents.len(),
            total = data.num_found,
            "Open Library search complete"
        );

        Ok(
            SearchResultSet::new(documents, data.num_found, ProviderKind::OpenLibrary)
                .paged(query.page, query.page_size),
        )
    }
}

// ===== Open Library API Types =====

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "numFound", alias = "num_found", default)]
    num_found: usize,
    #[serde(default)]
    docs: Vec<OLDoc>,
}

#[derive(Debug, Deserialize)]
struct OLDoc {
    key: String,
    title: Option<String>,
    author_name: Option<Vec<String>>,
    cover_i: Option<i64>,
    first_publish_year: Option<i32>,
    edition_count: Option<u32>,
    subject: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QueryBuilder;

    fn provider(base: &str) -> OpenLibraryProvider {
        OpenLibraryProvider::with_base_url(HttpClient::new(), base)
    }

    fn param(url: &Url, name: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    const DUNE_RESPONSE: &str = r#"{
        "numFound": 3,
        "docs": [
            {
                "key": "/works/OL1W",
                "title": "Dune Messiah",
                "author_name": ["Frank Herbert"],
                "cover_i": 12345,
                "first_publish_year": 2019,
                "edition_count": 4,
                "subject": ["Science fiction"]
            },
            {
                "key": "/works/OL2W",
                "title": "Dune",
                "author_name": ["Frank Herbert"],
                "first_publish_year": 1965
            },
            {
                "key": "/works/OL3W",
                "title": "Dune: The Graphic Novel",
                "first_publish_year": 2004
            },
            {
                "key": "/works/OL4W",
                "title": "Dune Companion"
            }
        ]
    }"#;

    #[test]
    fn test_build_url_modes() {
        let p = provider("https://openlibrary.org/");

        let all = QueryBuilder::new("dune").build().unwrap();
        let url = p.build_url(&all).unwrap();
        assert_eq!(url.path(), "/search.json");
        assert_eq!(param(&url, "q").as_deref(), Some("dune"));
        assert_eq!(param(&url, "page").as_deref(), Some("1"));
        assert!(param(&url, "sort").is_none());

        let by_author = QueryBuilder::new("frank herbert")
            .mode(SearchMode::Author)
            .page(2)
            .sort(SortPreference::New)
            .build()
            .unwrap();
        let url = p.build_url(&by_author).unwrap();
        assert_eq!(param(&url, "author").as_deref(), Some("frank herbert"));
        assert!(param(&url, "q").is_none());
        assert_eq!(param(&url, "page").as_deref(), Some("2"));
        assert_eq!(param(&url, "sort").as_deref(), Some("new"));

        let subject = QueryBuilder::new("poetry")
            .mode(SearchMode::Subject)
            .build()
            .unwrap();
        let url = p.build_url(&subject).unwrap();
        assert_eq!(param(&url, "subject").as_deref(), Some("poetry"));
    }

    #[test]
    fn test_build_url_uses_shared_page_size() {
        let query = QueryBuilder::new("dune").page(2).page_size(100).build().unwrap();
        let url = provider("https://openlibrary.org").build_url(&query).unwrap();
        assert_eq!(param(&url, "limit").as_deref(), Some("40"));
        assert_eq!(param(&url, "page").as_deref(), Some("2"));
    }

    #[test]
    fn test_cover_url() {
        assert_eq!(
            cover_url(12345),
            "https://covers.openlibrary.org/b/id/12345-M.jpg"
        );
    }

    #[tokio::test]
    async fn test_search_filters_and_sorts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search.json")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("title".into(), "dune".into()),
                mockito::Matcher::UrlEncoded("sort".into(), "old".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(DUNE_RESPONSE)
            .create_async()
            .await;

        let query = QueryBuilder::new("dune")
            .mode(SearchMode::Title)
            .year_start(Some(2000))
            .year_end(Some(2020))
            .sort(SortPreference::Old)
            .build()
            .unwrap();

        let result = provider(&server.url()).search(&query).await.unwrap();
        mock.assert_async().await;

        assert_eq!(result.provider, ProviderKind::OpenLibrary);
        assert_eq!(result.total, 3);
        let keys: Vec<_> = result.documents.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["/works/OL3W", "/works/OL1W"]);

        let messiah = result.find("/works/OL1W").unwrap();
        assert_eq!(
            messiah.cover_url.as_deref(),
            Some("https://covers.openlibrary.org/b/id/12345-M.jpg")
        );
        assert_eq!(messiah.edition_count, Some(4));
        assert_eq!(messiah.authors, vec!["Frank Herbert".to_string()]);
    }

    #[tokio::test]
    async fn test_search_relevance_keeps_order() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search.json")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(DUNE_RESPONSE)
            .create_async()
            .await;

        let query = QueryBuilder::new("dune").build().unwrap();
        let result = provider(&server.url()).search(&query).await.unwrap();
        let keys: Vec<_> = result.documents.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["/works/OL1W", "/works/OL2W", "/works/OL3W", "/works/OL4W"]
        );
    }

    #[tokio::test]
    async fn test_search_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search.json")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let query = QueryBuilder::new("dune").build().unwrap();
        let err = provider(&server.url()).search(&query).await.unwrap_err();
        assert!(err.is_transport());
    }
}
