//! Write-once association learning from resolved expenses.

use crate::categorize::tokens;
use crate::expense::Category;
use crate::store::AssociationStore;
use anyhow::Result;

/// Record `category` for every word of `description` that has no
/// association yet. Words that already have one keep it, even when
/// `category` differs — associations are only ever added.
///
/// Returns the number of new associations. The store is persisted only
/// when at least one insert happened, so repeat calls with the same pair
/// are no-ops.
pub fn learn<S: AssociationStore>(
    description: &str,
    category: Category,
    store: &mut S,
) -> Result<usize> {
    let mut inserted = 0;
    for word in tokens(description) {
        if store.insert(&word, category) {
            inserted += 1;
        }
    }
    if inserted > 0 {
        store.persist()?;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_learn_inserts_all_new_words() {
        let mut store = MemoryStore::new();
        let n = learn("cinema e pipoca", Category::Lazer, &mut store).unwrap();
        assert_eq!(n, 3);
        assert_eq!(store.lookup("cinema"), Some(Category::Lazer));
        assert_eq!(store.lookup("e"), Some(Category::Lazer));
        assert_eq!(store.lookup("pipoca"), Some(Category::Lazer));
    }

    #[test]
    fn test_learn_is_idempotent() {
        let mut store = MemoryStore::new();
        learn("almoço no shopping", Category::Alimentacao, &mut store).unwrap();
        let before = store.len();
        let n = learn("almoço no shopping", Category::Alimentacao, &mut store).unwrap();
        assert_eq!(n, 0);
        assert_eq!(store.len(), before);
    }

    #[test]
    fn test_learn_never_overwrites() {
        let mut store = MemoryStore::from_pairs([("uber", Category::Transporte)]);
        let n = learn("uber", Category::Lazer, &mut store).unwrap();
        assert_eq!(n, 0);
        assert_eq!(store.lookup("uber"), Some(Category::Transporte));
    }

    #[test]
    fn test_learn_lowercases_words() {
        let mut store = MemoryStore::new();
        learn("Cinema", Category::Lazer, &mut store).unwrap();
        assert_eq!(store.lookup("cinema"), Some(Category::Lazer));
        assert_eq!(store.lookup("Cinema"), None);
    }

    #[test]
    fn test_learn_empty_description_is_noop() {
        let mut store = MemoryStore::new();
        let n = learn("", Category::Outros, &mut store).unwrap();
        assert_eq!(n, 0);
        assert!(store.is_empty());
    }

    struct CountingStore {
        inner: MemoryStore,
        persists: usize,
    }

    impl AssociationStore for CountingStore {
        fn lookup(&self, word: &str) -> Option<Category> {
            self.inner.lookup(word)
        }
        fn insert(&mut self, word: &str, category: Category) -> bool {
            self.inner.insert(word, category)
        }
        fn persist(&mut self) -> Result<()> {
            self.persists += 1;
            Ok(())
        }
        fn len(&self) -> usize {
            self.inner.len()
        }
    }

    #[test]
    fn test_persist_only_when_something_changed() {
        let mut store = CountingStore {
            inner: MemoryStore::new(),
            persists: 0,
        };
        learn("cinema", Category::Lazer, &mut store).unwrap();
        assert_eq!(store.persists, 1);
        // Same pair again: nothing inserted, nothing persisted.
        learn("cinema", Category::Lazer, &mut store).unwrap();
        assert_eq!(store.persists, 1);
    }
}
