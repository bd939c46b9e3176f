//! Google Books search provider.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::models::{
    Document, DocumentBuilder, ProviderKind, SearchMode, SearchQuery, SearchResultSet,
    MAX_PAGE_SIZE,
};
use crate::sources::normalize::{self, upgrade_to_https, year_from_date};
use crate::sources::{Provider, ProviderError};
use crate::utils::HttpClient;

pub const GOOGLE_BOOKS_API_BASE: &str = "https://www.googleapis.com/books/v1";

/// Google Books provider
///
/// Uses the `volumes` endpoint. The search mode is expressed as a field
/// prefix inside the single `q` parameter.
#[derive(Debug, Clone)]
pub struct GoogleBooksProvider {
    client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleBooksProvider {
    /// Create a provider against the public Google Books API
    pub fn new() -> Self {
        Self::with_base_url(HttpClient::new(), GOOGLE_BOOKS_API_BASE)
    }

    /// Create a provider against a custom base URL
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: None,
        }
    }

    /// Attach an API key (optional; raises the anonymous quota)
    pub fn api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Combined `q` value with the mode's field prefix
    pub fn build_search_query(query: &SearchQuery) -> String {
        let prefix = match query.mode {
            SearchMode::All => "",
            SearchMode::Title => "intitle:",
            SearchMode::Author => "inauthor:",
            SearchMode::Subject => "subject:",
        };
        format!("{}{}", prefix, query.text)
    }

    /// `maxResults` for a query; the volumes endpoint accepts at most 40
    fn max_results(query: &SearchQuery) -> usize {
        query.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Build the request URL for a query
    pub fn build_url(&self, query: &SearchQuery) -> Result<Url, ProviderError> {
        let max_results = Self::max_results(query);
        let start_index = query
            .page
            .saturating_sub(1)
            .checked_mul(max_results)
            .ok_or_else(|| {
                ProviderError::InvalidRequest(format!("page {} is out of range", query.page))
            })?;

        let mut params: Vec<(&str, String)> = vec![
            ("q", Self::build_search_query(query)),
            ("startIndex", start_index.to_string()),
            ("maxResults", max_results.to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }

        let endpoint = format!("{}/volumes", self.base_url.trim_end_matches('/'));
        Ok(Url::parse_with_params(&endpoint, &params)?)
    }

    /// Map one volume into a [`Document`]
    fn parse_volume(volume: Volume) -> Document {
        let info = volume.volume_info.unwrap_or_default();

        let title = info
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "(untitled)".to_string());

        let mut builder =
            DocumentBuilder::new(volume.id, title).authors(info.authors.unwrap_or_default());

        let cover = info
            .image_links
            .and_then(|links| links.thumbnail.or(links.small_thumbnail));
        if let Some(cover) = cover {
            builder = builder.cover_url(upgrade_to_https(&cover));
        }
        if let Some(year) = info.published_date.as_deref().and_then(year_from_date) {
            builder = builder.year(year);
        }
        if let Some(categories) = info.categories {
            builder = builder.subjects(categories);
        }

        builder.build()
    }
}

impl Default for GoogleBooksProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for GoogleBooksProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GoogleBooks
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResultSet, ProviderError> {
        let url = self.build_url(query)?;
        let data: VolumesResponse = self.client.get_json(url, "Google Books").await?;

        let documents: Vec<Document> = data.items.into_iter().map(Self::parse_volume).collect();
        let fetched = documents.len();
        let documents = normalize::normalize(documents, query);

        tracing::debug!(
            fetched,
            kept = documents.len(),
            total = data.total_items,
            "Google Books search complete"
        );

        Ok(
            SearchResultSet::new(documents, data.total_items, ProviderKind::GoogleBooks)
                .paged(query.page, Self::max_results(query)),
        )
    }
}

// ===== Google Books API Types =====

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    #[serde(default)]
    total_items: usize,
    // Absent entirely when nothing matched
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    id: String,
    volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    published_date: Option<String>,
    image_links: Option<ImageLinks>,
    categories: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageLinks {
    thumbnail: Option<String>,
    small_thumbnail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QueryBuilder, SortPreference};

    fn provider(base: &str) -> GoogleBooksProvider {
        GoogleBooksProvider::with_base_url(HttpClient::new(), base)
    }

    fn param(url: &Url, name: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    const VOLUMES_RESPONSE: &str = r#"{
        "kind": "books#volumes",
        "totalItems": 812,
        "items": [
            {
                "id": "vol-a",
                "volumeInfo": {
                    "title": "Dune",
                    "authors": ["Frank Herbert"],
                    "publishedDate": "2005-08-02",
                    "imageLinks": {
                        "smallThumbnail": "http://books.google.com/small?id=a",
                        "thumbnail": "http://books.google.com/thumb?id=a"
                    },
                    "categories": ["Fiction"]
                }
            },
            {
                "id": "vol-b",
                "volumeInfo": {
                    "title": "Dune Road",
                    "publishedDate": "1998"
                }
            },
            {
                "id": "vol-c",
                "volumeInfo": {
                    "title": "The Road to Dune",
                    "authors": ["Brian Herbert", "Kevin J. Anderson"],
                    "publishedDate": "2016-01",
                    "imageLinks": { "smallThumbnail": "http://books.google.com/small?id=c" }
                }
            },
            {
                "id": "vol-d",
                "volumeInfo": { "title": "Dune Notes" }
            }
        ]
    }"#;

    #[test]
    fn test_build_search_query_prefixes() {
        let q = |mode| QueryBuilder::new("dune").mode(mode).build().unwrap();
        assert_eq!(GoogleBooksProvider::build_search_query(&q(SearchMode::All)), "dune");
        assert_eq!(
            GoogleBooksProvider::build_search_query(&q(SearchMode::Title)),
            "intitle:dune"
        );
        assert_eq!(
            GoogleBooksProvider::build_search_query(&q(SearchMode::Author)),
            "inauthor:dune"
        );
        assert_eq!(
            GoogleBooksProvider::build_search_query(&q(SearchMode::Subject)),
            "subject:dune"
        );
    }

    #[test]
    fn test_build_url_paging_and_key() {
        let query = QueryBuilder::new("dune").page(3).page_size(20).build().unwrap();
        let p = provider("https://www.googleapis.com/books/v1").api_key(Some("k123".into()));
        let url = p.build_url(&query).unwrap();

        assert_eq!(url.path(), "/books/v1/volumes");
        assert_eq!(param(&url, "startIndex").as_deref(), Some("40"));
        assert_eq!(param(&url, "maxResults").as_deref(), Some("20"));
        assert_eq!(param(&url, "key").as_deref(), Some("k123"));

        let big = QueryBuilder::new("dune").page_size(100).build().unwrap();
        let url = provider("https://x").build_url(&big).unwrap();
        assert_eq!(param(&url, "maxResults").as_deref(), Some("40"));
        assert!(param(&url, "key").is_none());
    }

    #[test]
    fn test_build_url_caps_hand_built_page_size() {
        let mut query = QueryBuilder::new("dune").page(2).build().unwrap();
        query.page_size = 100;

        let url = provider("https://x").build_url(&query).unwrap();
        assert_eq!(param(&url, "startIndex").as_deref(), Some("40"));
        assert_eq!(param(&url, "maxResults").as_deref(), Some("40"));
    }

    #[test]
    fn test_build_url_rejects_page_overflow() {
        let query = QueryBuilder::new("dune").page(usize::MAX).build().unwrap();
        let err = provider("https://x").build_url(&query).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_search_reports_served_page_size() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/volumes")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("startIndex".into(), "40".into()),
                mockito::Matcher::UrlEncoded("maxResults".into(), "40".into()),
            ]))
            .with_status(200)
            .with_body(VOLUMES_RESPONSE)
            .create_async()
            .await;

        let query = QueryBuilder::new("dune").page(2).page_size(100).build().unwrap();
        let result = provider(&server.url()).search(&query).await.unwrap();
        mock.assert_async().await;

        assert_eq!(result.page, 2);
        assert_eq!(result.page_size, 40);
        assert_eq!(result.total_pages(), 21);
        assert!(result.has_more());
    }

    #[tokio::test]
    async fn test_search_page_overflow_issues_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/volumes")
            .match_query(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let query = QueryBuilder::new("dune").page(usize::MAX).build().unwrap();
        let err = provider(&server.url()).search(&query).await.unwrap_err();
        mock.assert_async().await;
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let p = provider("https://x").api_key(Some("  ".into()));
        let url = p.build_url(&QueryBuilder::new("a").build().unwrap()).unwrap();
        assert!(param(&url, "key").is_none());
    }

    #[tokio::test]
    async fn test_search_maps_schema() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/volumes")
            .match_query(mockito::Matcher::UrlEncoded(
                "q".into(),
                "intitle:dune".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(VOLUMES_RESPONSE)
            .create_async()
            .await;

        let query = QueryBuilder::new("dune")
            .mode(SearchMode::Title)
            .build()
            .unwrap();
        let result = provider(&server.url()).search(&query).await.unwrap();
        mock.assert_async().await;

        assert_eq!(result.provider, ProviderKind::GoogleBooks);
        assert_eq!(result.total, 812);
        assert_eq!(result.documents.len(), 4);

        let dune = result.find("vol-a").unwrap();
        assert_eq!(dune.first_publish_year, Some(2005));
        assert_eq!(
            dune.cover_url.as_deref(),
            Some("https://books.google.com/thumb?id=a")
        );
        assert_eq!(dune.subjects.as_deref(), Some(&["Fiction".to_string()][..]));
        assert_eq!(dune.edition_count, None);

        let road = result.find("vol-c").unwrap();
        assert_eq!(road.first_publish_year, Some(2016));
        assert_eq!(
            road.cover_url.as_deref(),
            Some("https://books.google.com/small?id=c")
        );
        assert_eq!(road.authors.len(), 2);

        assert_eq!(result.find("vol-d").unwrap().first_publish_year, None);
    }

    #[tokio::test]
    async fn test_search_filters_and_sorts_new() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/volumes")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(VOLUMES_RESPONSE)
            .create_async()
            .await;

        let query = QueryBuilder::new("dune")
            .year_end(Some(2010))
            .sort(SortPreference::New)
            .build()
            .unwrap();
        let result = provider(&server.url()).search(&query).await.unwrap();
        let keys: Vec<_> = result.documents.iter().map(|d| d.key.as_str()).collect();
        // vol-c (2016) is above the bound; undated vol-d passes an upper bound only
        assert_eq!(keys, vec!["vol-a", "vol-b", "vol-d"]);
    }

    #[tokio::test]
    async fn test_search_without_items() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/volumes")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"kind": "books#volumes", "totalItems": 0}"#)
            .create_async()
            .await;

        let query = QueryBuilder::new("zzzzqx").build().unwrap();
        let result = provider(&server.url()).search(&query).await.unwrap();
        assert!(result.documents.is_empty());
        assert_eq!(result.total, 0);
    }

    #[tokio::test]
    async fn test_search_forbidden() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/volumes")
            .match_query(mockito::Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let query = QueryBuilder::new("dune").build().unwrap();
        let err = provider(&server.url()).search(&query).await.unwrap_err();
        assert_eq!(
            err,
            ProviderError::Transport {
                provider: "Google Books".to_string(),
                status: 403
            }
        );
    }
}
