//! Favorites persistence backends.

use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::FavoritesStore;
use crate::models::Favorite;

/// Fixed key the favorites array is stored under
pub const FAVORITES_KEY: &str = "book-finder.favorites";

/// Errors from a favorites store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Key-value JSON file holding the favorites array under [`FAVORITES_KEY`].
///
/// Other keys already present in the file are preserved on save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    key: String,
}

impl JsonFileStore {
    /// Store favorites in the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: FAVORITES_KEY.to_string(),
        }
    }

    /// Use a different key inside the file
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// File path (for external access)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole key-value object; unreadable content counts as empty
    fn read_object(&self) -> io::Result<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e),
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "favorites file is not a JSON object, ignoring");
                Ok(Map::new())
            }
        }
    }
}

impl FavoritesStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Favorite>, StoreError> {
        let mut object = self.read_object()?;
        let Some(value) = object.remove(&self.key) else {
            return Ok(Vec::new());
        };

        match serde_json::from_value(value) {
            Ok(list) => Ok(list),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "stored favorites are malformed, starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, favorites: &[Favorite]) -> Result<(), StoreError> {
        let mut object = self.read_object()?;
        object.insert(self.key.clone(), serde_json::to_value(favorites)?);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write beside the target, then rename over it
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&Value::Object(object))?)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = favorites.len(), "saved favorites");
        Ok(())
    }
}

/// In-memory store, for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<Favorite>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-populated list
    pub fn with_entries(entries: Vec<Favorite>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl FavoritesStore for MemoryStore {
    fn load(&self) -> Result<Vec<Favorite>, StoreError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, favorites: &[Favorite]) -> Result<(), StoreError> {
        *self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = favorites.to_vec();
        Ok(())
    }
}
