//! Configuration file support for book-finder.
//!
//! This module writes the TOML form of [`Config`]; the `config init`
//! command uses it to write a starting file that
//! [`load_config`](super::load_config) reads back.
//!
//! # Configuration File Format
//!
//! ```toml
//! [providers]
//! open_library_url = "https://openlibrary.org"
//! google_books_url = "https://www.googleapis.com/books/v1"
//! google_books_api_key = "your-api-key"
//!
//! [search]
//! page_size = 20
//! debounce_ms = 400
//! default_mode = "all"      # all | title | author | subject
//! default_sort = "relevance" # relevance | new | old
//!
//! [http]
//! timeout_secs = 30
//! connect_timeout_secs = 10
//!
//! [favorites]
//! path = "~/.config/book-finder/favorites.json"
//!
//! [logging]
//! level = "warn"
//! ```

use std::path::Path;

use super::Config;

impl Config {
    /// Save configuration to a TOML file, creating parent directories
    pub fn save_file(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use crate::models::SortPreference;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_saved_file_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.providers.google_books_api_key = Some("saved-key".to_string());
        config.search.default_sort = SortPreference::New;
        config.favorites.path = Some(PathBuf::from("/data/favs.json"));

        config.save_file(&path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_file_into_unwritable_parent() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let result = Config::default().save_file(&blocker.join("config.toml"));
        assert!(matches!(result, Err(ConfigFileError::Io(_))));
    }
}
