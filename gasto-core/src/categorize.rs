//! Description → category inference over learned associations.

use crate::expense::Category;
use crate::store::AssociationStore;

/// Tokenization shared by the categorizer and the learner: lowercase,
/// whitespace-delimited. Punctuation stays attached to its word.
pub(crate) fn tokens(description: &str) -> Vec<String> {
    description
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Infer a category by scanning tokens strictly left to right and
/// returning the association of the first known word.
///
/// No frequency or best-match logic: an earlier weak signal beats a later
/// strong one. Returns `None` only when no token has an association.
pub fn categorize<S: AssociationStore>(description: &str, store: &S) -> Option<Category> {
    tokens(description)
        .into_iter()
        .find_map(|word| store.lookup(&word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_empty_store_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(categorize("cinema", &store), None);
    }

    #[test]
    fn test_case_insensitive_match() {
        let store = MemoryStore::from_pairs([("cinema", Category::Lazer)]);
        assert_eq!(categorize("Cinema E Pipoca", &store), Some(Category::Lazer));
    }

    #[test]
    fn test_first_known_token_wins() {
        let store = MemoryStore::from_pairs([
            ("uber", Category::Transporte),
            ("cinema", Category::Lazer),
        ]);
        // "uber" appears first, so Transporte wins even though "cinema"
        // is also known.
        assert_eq!(
            categorize("uber até o cinema", &store),
            Some(Category::Transporte)
        );
    }

    #[test]
    fn test_deterministic() {
        let store = MemoryStore::from_pairs([("mercado", Category::Alimentacao)]);
        for _ in 0..5 {
            assert_eq!(
                categorize("compras no mercado", &store),
                Some(Category::Alimentacao)
            );
        }
    }

    #[test]
    fn test_empty_description_returns_none() {
        let store = MemoryStore::from_pairs([("uber", Category::Transporte)]);
        assert_eq!(categorize("", &store), None);
    }
}
