use std::collections::HashMap;

use crate::models::{CatalogItem, MovieId, MovieRecord};

/// Immutable, row-ordered movie catalog.
///
/// Row order is load-bearing: row `i` of the catalog corresponds to row and
/// column `i` of the similarity matrix. The store is built once at startup
/// and only read afterwards.
pub struct CatalogStore {
    items: Vec<CatalogItem>,
    by_title: HashMap<String, usize>,
    by_id: HashMap<MovieId, usize>,
}

impl CatalogStore {
    /// Builds the store from the row-aligned artifact records.
    ///
    /// Duplicate titles are tolerated but flagged: lookups by title resolve
    /// to the first occurring row, so callers who need an unambiguous key
    /// should use the movie id instead.
    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        let mut items = Vec::with_capacity(records.len());
        let mut by_title = HashMap::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());

        for (row_index, record) in records.into_iter().enumerate() {
            if let Some(first) = by_title.get(&record.title) {
                tracing::warn!(
                    title = %record.title,
                    first_row = first,
                    duplicate_row = row_index,
                    "Duplicate title in catalog; title lookups resolve to the first row"
                );
            } else {
                by_title.insert(record.title.clone(), row_index);
            }

            by_id.insert(record.movie_id, row_index);

            items.push(CatalogItem {
                id: record.movie_id,
                title: record.title,
                row_index,
            });
        }

        Self {
            items,
            by_title,
            by_id,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All catalog items in row order
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn get(&self, row_index: usize) -> Option<&CatalogItem> {
        self.items.get(row_index)
    }

    /// Resolves a title to its row index (first occurrence on duplicates)
    pub fn row_for_title(&self, title: &str) -> Option<usize> {
        self.by_title.get(title).copied()
    }

    /// Resolves a movie id to its row index
    pub fn row_for_id(&self, id: MovieId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, title: &str) -> MovieRecord {
        MovieRecord {
            movie_id: MovieId(id),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_row_index_matches_artifact_order() {
        let store = CatalogStore::from_records(vec![
            record(10, "A"),
            record(20, "B"),
            record(30, "C"),
        ]);

        assert_eq!(store.len(), 3);
        for (i, item) in store.items().iter().enumerate() {
            assert_eq!(item.row_index, i);
        }
        assert_eq!(store.get(1).map(|item| item.id), Some(MovieId(20)));
    }

    #[test]
    fn test_row_for_title_exact_match() {
        let store = CatalogStore::from_records(vec![record(10, "A"), record(20, "B")]);

        assert_eq!(store.row_for_title("B"), Some(1));
        assert_eq!(store.row_for_title("b"), None);
        assert_eq!(store.row_for_title("Missing"), None);
    }

    #[test]
    fn test_duplicate_title_resolves_to_first_row() {
        let store = CatalogStore::from_records(vec![
            record(10, "Solaris"),
            record(20, "Stalker"),
            record(30, "Solaris"),
        ]);

        assert_eq!(store.row_for_title("Solaris"), Some(0));
        // Both rows are still present and addressable by id.
        assert_eq!(store.row_for_id(MovieId(30)), Some(2));
    }

    #[test]
    fn test_row_for_id() {
        let store = CatalogStore::from_records(vec![record(10, "A"), record(20, "B")]);

        assert_eq!(store.row_for_id(MovieId(10)), Some(0));
        assert_eq!(store.row_for_id(MovieId(99)), None);
    }
}
