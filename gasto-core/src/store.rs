//! Word → category association storage.
//!
//! One category per distinct word, write-once: the first association a
//! word ever gets is the one it keeps. Conflicting later writes are
//! rejected by `insert`, so the policy lives in the store contract rather
//! than in file-append order.

use crate::expense::Category;
use anyhow::Result;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Storage contract shared by the categorizer (read) and the learner
/// (read-write). Implementations decide where the mapping lives.
pub trait AssociationStore {
    /// Category currently associated with `word`, if any. Words are
    /// stored lowercase; callers pass lowercase tokens.
    fn lookup(&self, word: &str) -> Option<Category>;

    /// Associate `word` with `category` if the word has no entry yet.
    /// Returns `false` and leaves the store untouched when it does.
    fn insert(&mut self, word: &str, category: Category) -> bool;

    /// Flush the mapping to the backing collaborator. In-memory stores
    /// may no-op.
    fn persist(&mut self) -> Result<()>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Volatile in-memory store: the default for tests and dry runs, and the
/// reference behavior for file-backed implementations.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: HashMap<String, Category>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from `(word, category)` pairs, first pair wins.
    pub fn from_pairs<I, W>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (W, Category)>,
        W: Into<String>,
    {
        let mut store = Self::new();
        for (word, category) in pairs {
            store.insert(&word.into(), category);
        }
        store
    }
}

impl AssociationStore for MemoryStore {
    fn lookup(&self, word: &str) -> Option<Category> {
        self.map.get(word).copied()
    }

    fn insert(&mut self, word: &str, category: Category) -> bool {
        match self.map.entry(word.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(category);
                true
            }
        }
    }

    fn persist(&mut self) -> Result<()> {
        Ok(())
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_then_lookup() {
        let mut store = MemoryStore::new();
        assert!(store.insert("uber", Category::Transporte));
        assert_eq!(store.lookup("uber"), Some(Category::Transporte));
        assert_eq!(store.lookup("cinema"), None);
    }

    #[test]
    fn test_first_write_wins() {
        let mut store = MemoryStore::new();
        assert!(store.insert("uber", Category::Transporte));
        assert!(!store.insert("uber", Category::Lazer));
        assert_eq!(store.lookup("uber"), Some(Category::Transporte));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_from_pairs_keeps_first() {
        let store = MemoryStore::from_pairs([
            ("uber", Category::Transporte),
            ("uber", Category::Lazer),
            ("cinema", Category::Lazer),
        ]);
        assert_eq!(store.lookup("uber"), Some(Category::Transporte));
        assert_eq!(store.len(), 2);
    }
}
