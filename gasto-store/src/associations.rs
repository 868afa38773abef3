//! CSV-backed association store.
//!
//! On-disk format, plain CSV so spreadsheet tools can open it:
//!   Palavra,Categoria
//!   uber,Transporte
//!
//! Loaded fully into memory; persisted as a full rewrite, sorted by word
//! so the file is stable across runs.

use anyhow::{Context, Result};
use gasto_core::{AssociationStore, Category};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

pub struct CsvAssociationStore {
    path: PathBuf,
    map: HashMap<String, Category>,
}

impl CsvAssociationStore {
    /// Load the association file, starting empty when it does not exist
    /// yet. Rows with unknown category labels are skipped; duplicate
    /// words in a hand-edited file resolve first-row-wins.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut map = HashMap::new();

        if path.exists() {
            let mut rdr = csv::ReaderBuilder::new()
                .flexible(true)
                .from_path(&path)
                .with_context(|| format!("opening {}", path.display()))?;

            for result in rdr.records() {
                let record = result?;
                let word = record.get(0).unwrap_or("").trim().to_lowercase();
                let label = record.get(1).unwrap_or("").trim();
                if word.is_empty() {
                    continue;
                }
                let Some(category) = Category::from_label(label) else {
                    continue;
                };
                map.entry(word).or_insert(category);
            }
        }

        Ok(Self { path, map })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AssociationStore for CsvAssociationStore {
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
        let mut wtr = csv::Writer::from_path(&self.path)
            .with_context(|| format!("writing {}", self.path.display()))?;
        wtr.write_record(["Palavra", "Categoria"])?;

        let mut rows: Vec<_> = self.map.iter().collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        for (word, category) in rows {
            wtr.write_record([word.as_str(), category.label()])?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gasto-assoc-{}-{}.csv", std::process::id(), name))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        let store = CsvAssociationStore::load(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_persist_then_reload() {
        let path = temp_path("roundtrip");
        let _ = fs::remove_file(&path);

        let mut store = CsvAssociationStore::load(&path).unwrap();
        assert!(store.insert("uber", Category::Transporte));
        assert!(store.insert("cinema", Category::Lazer));
        store.persist().unwrap();

        let reloaded = CsvAssociationStore::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.lookup("uber"), Some(Category::Transporte));
        assert_eq!(reloaded.lookup("cinema"), Some(Category::Lazer));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_duplicate_rows_first_wins() {
        let path = temp_path("dupes");
        fs::write(
            &path,
            "Palavra,Categoria\nuber,Transporte\nuber,Lazer\n",
        )
        .unwrap();

        let store = CsvAssociationStore::load(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup("uber"), Some(Category::Transporte));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unknown_labels_are_skipped() {
        let path = temp_path("unknown");
        fs::write(
            &path,
            "Palavra,Categoria\nuber,Transporte\nbola,Futebol\n",
        )
        .unwrap();

        let store = CsvAssociationStore::load(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup("bola"), None);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_words_load_lowercased() {
        let path = temp_path("case");
        fs::write(&path, "Palavra,Categoria\nUber,Transporte\n").unwrap();

        let store = CsvAssociationStore::load(&path).unwrap();
        assert_eq!(store.lookup("uber"), Some(Category::Transporte));

        let _ = fs::remove_file(&path);
    }
}
