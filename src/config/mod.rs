//! Configuration management.
//!
//! Settings come from (lowest to highest priority) built-in defaults, a TOML
//! file, and `BOOK_FINDER_*` environment variables. Nested keys use a double
//! underscore, e.g. `BOOK_FINDER_SEARCH__PAGE_SIZE=10`.

mod file_config;

pub use file_config::ConfigFileError;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{SearchMode, SortPreference, DEFAULT_PAGE_SIZE};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "BOOK_FINDER";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Provider endpoints and keys
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Search defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Favorites storage
    #[serde(default)]
    pub favorites: FavoritesConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Provider endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Base URL of the primary (Open Library) API
    #[serde(default = "default_open_library_url")]
    pub open_library_url: String,

    /// Base URL of the fallback (Google Books) API
    #[serde(default = "default_google_books_url")]
    pub google_books_url: String,

    /// Google Books API key (optional)
    #[serde(default = "default_google_books_api_key")]
    pub google_books_api_key: Option<String>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            open_library_url: default_open_library_url(),
            google_books_url: default_google_books_url(),
            google_books_api_key: default_google_books_api_key(),
        }
    }
}

fn default_open_library_url() -> String {
    crate::sources::OPEN_LIBRARY_API_BASE.to_string()
}

fn default_google_books_url() -> String {
    crate::sources::GOOGLE_BOOKS_API_BASE.to_string()
}

fn default_google_books_api_key() -> Option<String> {
    std::env::var("GOOGLE_BOOKS_API_KEY").ok()
}

/// Search defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Documents requested per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Delay before a typed query is committed (interactive mode)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Mode used when none is given
    #[serde(default)]
    pub default_mode: SearchMode,

    /// Sort used when none is given
    #[serde(default)]
    pub default_sort: SortPreference,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
            default_mode: SearchMode::default(),
            default_sort: SortPreference::default(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_debounce_ms() -> u64 {
    400
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Custom User-Agent header
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

/// Favorites storage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoritesConfig {
    /// Favorites file; defaults to `<config dir>/book-finder/favorites.json`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl FavoritesConfig {
    /// Resolved favorites file location
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| config_dir().join("favorites.json"))
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when neither `RUST_LOG` nor `-v` is given
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Per-user configuration directory for this application
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("book-finder")
}

/// Load configuration from a file, with environment overrides on top
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Get the configuration from defaults and environment variables only
pub fn get_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(environment())
        .build()?
        .try_deserialize()
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Find a config file in the default locations.
///
/// Checks `./book-finder.toml`, then `<config dir>/book-finder/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let candidates = [
        PathBuf::from("book-finder.toml"),
        config_dir().join("config.toml"),
    ];
    candidates.into_iter().find(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search.page_size, 20);
        assert_eq!(config.search.debounce_ms, 400);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.providers.open_library_url, "https://openlibrary.org");
        assert_eq!(
            config.providers.google_books_url,
            "https://www.googleapis.com/books/v1"
        );
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book-finder.toml");
        std::fs::write(
            &path,
            r#"
[providers]
open_library_url = "http://localhost:9000"

[search]
page_size = 10
default_mode = "author"
default_sort = "old"

[favorites]
path = "/tmp/favs.json"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.providers.open_library_url, "http://localhost:9000");
        assert_eq!(
            config.providers.google_books_url,
            "https://www.googleapis.com/books/v1"
        );
        assert_eq!(config.search.page_size, 10);
        assert_eq!(config.search.default_mode, SearchMode::Author);
        assert_eq!(config.search.default_sort, SortPreference::Old);
        assert_eq!(
            config.favorites.resolved_path(),
            PathBuf::from("/tmp/favs.json")
        );
        assert_eq!(config.http.connect_timeout_secs, 10);
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config(Path::new("/nonexistent/book-finder.toml")).is_err());
    }

    #[test]
    fn test_default_favorites_path() {
        let path = FavoritesConfig::default().resolved_path();
        assert!(path.ends_with("book-finder/favorites.json"));
    }
}
