use std::sync::Arc;

use crate::services::PosterProvider;
use crate::store::{CatalogStore, SimilarityMatrix};

/// Shared application state.
///
/// The catalog and similarity matrix are immutable after startup, so
/// handlers read them without locking; only the poster provider keeps its
/// own internal cache.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub similarity: Arc<SimilarityMatrix>,
    pub posters: Arc<dyn PosterProvider>,
}

impl AppState {
    /// Wraps the loaded stores and poster provider for handler access
    pub fn new(
        catalog: CatalogStore,
        similarity: SimilarityMatrix,
        posters: Arc<dyn PosterProvider>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            similarity: Arc::new(similarity),
            posters,
        }
    }
}
