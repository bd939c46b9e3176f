//! Document model representing a book from any provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The provider that produced a result set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    OpenLibrary,
    GoogleBooks,
    #[serde(untagged)]
    Other(String),
}

impl ProviderKind {
    /// Returns the display name of the provider
    pub fn name(&self) -> &str {
        match self {
            ProviderKind::OpenLibrary => "Open Library",
            ProviderKind::GoogleBooks => "Google Books",
            ProviderKind::Other(s) => s,
        }
    }

    /// Returns the provider identifier
    pub fn id(&self) -> &str {
        match self {
            ProviderKind::OpenLibrary => "openlibrary",
            ProviderKind::GoogleBooks => "google_books",
            ProviderKind::Other(s) => s,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A book returned by a search provider
///
/// Fields other than the key and title are optional because the providers
/// expose different subsets of bibliographic data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Provider-specific key (e.g. `/works/OL45883W` or a Google volume id)
    pub key: String,

    /// Book title
    pub title: String,

    /// Author names, in provider order
    #[serde(default)]
    pub authors: Vec<String>,

    /// Cover image URL
    pub cover_url: Option<String>,

    /// Year of first publication
    pub first_publish_year: Option<i32>,

    /// Number of known editions
    pub edition_count: Option<u32>,

    /// Subject headings
    pub subjects: Option<Vec<String>>,
}

impl Document {
    /// Create a new document with required fields
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            authors: Vec::new(),
            cover_url: None,
            first_publish_year: None,
            edition_count: None,
            subjects: None,
        }
    }

    /// Authors joined for display
    pub fn author_line(&self) -> String {
        self.authors.join(", ")
    }

    /// Year used for ordering; a missing year sorts as 0
    pub fn sort_year(&self) -> i32 {
        self.first_publish_year.unwrap_or(0)
    }

    /// Reduce this document to the fields kept in the favorites list
    pub fn to_favorite(&self) -> Favorite {
        Favorite {
            key: self.key.clone(),
            title: self.title.clone(),
            authors: self.authors.clone(),
            cover_url: self.cover_url.clone(),
            added_at: Utc::now(),
        }
    }
}

/// Builder for constructing Document objects
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    /// Create a new builder with required fields
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            document: Document::new(key, title),
        }
    }

    /// Set authors
    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.document.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Set cover URL
    pub fn cover_url(mut self, url: impl Into<String>) -> Self {
        self.document.cover_url = Some(url.into());
        self
    }

    /// Set first publish year
    pub fn year(mut self, year: i32) -> Self {
        self.document.first_publish_year = Some(year);
        self
    }

    /// Set edition count
    pub fn edition_count(mut self, count: u32) -> Self {
        self.document.edition_count = Some(count);
        self
    }

    /// Set subjects
    pub fn subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.document.subjects = Some(subjects.into_iter().map(Into::into).collect());
        self
    }

    /// Build the Document
    pub fn build(self) -> Document {
        self.document
    }
}

/// A bookmarked document, as persisted in the favorites list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    /// Key of the document this favorite was saved from
    pub key: String,

    /// Book title
    pub title: String,

    /// Author names
    #[serde(default)]
    pub authors: Vec<String>,

    /// Cover image URL
    pub cover_url: Option<String>,

    /// When the favorite was added
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

impl Favorite {
    /// Create a favorite from its parts
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            authors: Vec::new(),
            cover_url: None,
            added_at: Utc::now(),
        }
    }
}

impl From<&Document> for Favorite {
    fn from(doc: &Document) -> Self {
        doc.to_favorite()
    }
}
