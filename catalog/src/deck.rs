use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::item::Item;

/// An ordered selection of items for printing.
///
/// Insertion dedups on the `(type, name)` identity; order is
/// user-meaningful and preserved through export and import.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    items: Vec<Item>,
}

/// Errors raised while reading or writing a deck file.
#[derive(Debug)]
pub enum DeckError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::Io { path, source } => {
                write!(f, "cannot access deck file '{}': {}", path.display(), source)
            }
            DeckError::Json { path, source } => {
                write!(f, "invalid deck JSON in '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for DeckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeckError::Io { source, .. } => Some(source),
            DeckError::Json { source, .. } => Some(source),
        }
    }
}

impl Deck {
    pub fn new() -> Deck {
        Deck::default()
    }

    /// Build a deck from a list of items, dropping duplicate identities.
    pub fn from_items(items: Vec<Item>) -> Deck {
        let mut deck = Deck::new();
        for item in items {
            deck.add(item);
        }
        deck
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Add an item unless one with the same identity is already present.
    /// Returns whether the deck changed.
    pub fn add(&mut self, item: Item) -> bool {
        if self.position(&item.kind, &item.name).is_some() {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn remove(&mut self, kind: &str, name: &str) -> bool {
        match self.position(kind, name) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn move_up(&mut self, kind: &str, name: &str) -> bool {
        match self.position(kind, name) {
            Some(idx) if idx > 0 => {
                self.items.swap(idx - 1, idx);
                true
            }
            _ => false,
        }
    }

    pub fn move_down(&mut self, kind: &str, name: &str) -> bool {
        match self.position(kind, name) {
            Some(idx) if idx + 1 < self.items.len() => {
                self.items.swap(idx, idx + 1);
                true
            }
            _ => false,
        }
    }

    /// Reposition by index. Out-of-range indices are a no-op.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.items.len() || to >= self.items.len() {
            return false;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        true
    }

    /// Read a deck back from its JSON export. A missing file is an empty
    /// deck, so first use needs no setup step.
    pub fn load(path: &Path) -> Result<Deck, DeckError> {
        if !path.exists() {
            return Ok(Deck::new());
        }
        let text = std::fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let items: Vec<Item> = serde_json::from_str(&text).map_err(|source| DeckError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("read {} deck items from {}", items.len(), path.display());
        Ok(Deck::from_items(items))
    }

    /// Export the deck as a JSON array of items.
    pub fn save(&self, path: &Path) -> Result<(), DeckError> {
        let json =
            serde_json::to_string_pretty(&self.items).map_err(|source| DeckError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        std::fs::write(path, json).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("wrote {} deck items to {}", self.items.len(), path.display());
        Ok(())
    }

    fn position(&self, kind: &str, name: &str) -> Option<usize> {
        self.items.iter().position(|it| it.same_identity(kind, name))
    }
}
