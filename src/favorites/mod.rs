//! Bookmarked documents.
//!
//! [`Favorites`] holds the in-memory list and writes it back through a
//! [`FavoritesStore`] after every change. The list is most-recent-first,
//! holds at most [`FAVORITES_CAPACITY`] entries and never repeats a key.

mod store;

pub use store::{JsonFileStore, MemoryStore, StoreError, FAVORITES_KEY};

use crate::models::{Document, Favorite};

/// Maximum number of favorites kept
pub const FAVORITES_CAPACITY: usize = 50;

/// Persistence backend for the favorites list
pub trait FavoritesStore: Send + Sync + std::fmt::Debug {
    /// Read the stored list. A missing entry is an empty list.
    fn load(&self) -> Result<Vec<Favorite>, StoreError>;

    /// Replace the stored list.
    fn save(&self, favorites: &[Favorite]) -> Result<(), StoreError>;
}

impl<S: FavoritesStore + ?Sized> FavoritesStore for Box<S> {
    fn load(&self) -> Result<Vec<Favorite>, StoreError> {
        (**self).load()
    }

    fn save(&self, favorites: &[Favorite]) -> Result<(), StoreError> {
        (**self).save(favorites)
    }
}

/// Put `favorite` at the front, dropping any older entry with the same key
/// and anything past capacity.
pub fn insert_front(list: &mut Vec<Favorite>, favorite: Favorite) {
    list.retain(|f| f.key != favorite.key);
    list.insert(0, favorite);
    list.truncate(FAVORITES_CAPACITY);
}

/// Repair a list read from storage: first occurrence of a key wins and the
/// list is cut to capacity.
pub fn sanitize(list: Vec<Favorite>) -> Vec<Favorite> {
    let mut seen = std::collections::HashSet::new();
    let mut list: Vec<Favorite> = list
        .into_iter()
        .filter(|f| seen.insert(f.key.clone()))
        .collect();
    list.truncate(FAVORITES_CAPACITY);
    list
}

/// The favorites list bound to its store
#[derive(Debug)]
pub struct Favorites<S: FavoritesStore> {
    store: S,
    entries: Vec<Favorite>,
}

impl<S: FavoritesStore> Favorites<S> {
    /// Load the list from `store`
    pub fn open(store: S) -> Result<Self, StoreError> {
        let entries = sanitize(store.load()?);
        Ok(Self { store, entries })
    }

    /// Entries, most recent first
    pub fn entries(&self) -> &[Favorite] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a document key is bookmarked
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|f| f.key == key)
    }

    /// Bookmark a favorite, moving it to the front if already present
    pub fn add(&mut self, favorite: Favorite) -> Result<(), StoreError> {
        tracing::info!(key = %favorite.key, "adding favorite");
        insert_front(&mut self.entries, favorite);
        self.persist()
    }

    /// Bookmark a search result
    pub fn add_document(&mut self, document: &Document) -> Result<(), StoreError> {
        self.add(document.to_favorite())
    }

    /// Remove by key; returns whether anything was removed
    pub fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        let before = self.entries.len();
        self.entries.retain(|f| f.key != key);
        if self.entries.len() == before {
            return Ok(false);
        }
        tracing::info!(key, "removed favorite");
        self.persist()?;
        Ok(true)
    }

    /// Add if absent, remove if present; returns whether it is now bookmarked
    pub fn toggle(&mut self, favorite: Favorite) -> Result<bool, StoreError> {
        if self.remove(&favorite.key)? {
            Ok(false)
        } else {
            self.add(favorite)?;
            Ok(true)
        }
    }

    /// Remove everything
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        tracing::info!("cleared favorites");
        self.persist()
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save(&self.entries)
    }
}
