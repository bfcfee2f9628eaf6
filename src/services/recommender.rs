use std::cmp::Ordering;

use crate::{
    error::{AppError, AppResult},
    models::{MovieId, Recommendation},
    store::{CatalogStore, SimilarityMatrix},
};

/// Default number of recommendations returned when the caller does not ask
/// for a specific k
pub const DEFAULT_K: usize = 5;

/// Returns the top-k movies most similar to `title`.
///
/// The title must exactly match a catalog entry; on duplicate titles the
/// first occurring row wins (see `CatalogStore::row_for_title`). Use
/// [`recommend_by_id`] to avoid that ambiguity.
pub fn recommend(
    catalog: &CatalogStore,
    similarity: &SimilarityMatrix,
    title: &str,
    k: usize,
) -> AppResult<Vec<Recommendation>> {
    let row = catalog
        .row_for_title(title)
        .ok_or_else(|| AppError::UnknownTitle(title.to_string()))?;

    rank(catalog, similarity, row, k)
}

/// Returns the top-k movies most similar to the movie with the given id
pub fn recommend_by_id(
    catalog: &CatalogStore,
    similarity: &SimilarityMatrix,
    id: MovieId,
    k: usize,
) -> AppResult<Vec<Recommendation>> {
    let row = catalog
        .row_for_id(id)
        .ok_or(AppError::UnknownMovie(id))?;

    rank(catalog, similarity, row, k)
}

/// Ranks every other catalog item against row `row` and keeps the first k.
///
/// Pure and synchronous: a read-only pass over immutable data, safe to call
/// concurrently without coordination. Output is deterministic for a fixed
/// (catalog, matrix, row, k).
fn rank(
    catalog: &CatalogStore,
    similarity: &SimilarityMatrix,
    row: usize,
    k: usize,
) -> AppResult<Vec<Recommendation>> {
    if k == 0 {
        return Err(AppError::InvalidInput(
            "k must be at least 1".to_string(),
        ));
    }

    let mut ranked: Vec<(usize, f32)> = similarity
        .row(row)
        .iter()
        .copied()
        .enumerate()
        .collect();

    // Stable sort: ties keep ascending column order.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    // The query row is dropped by column index, not by rank. A tie or an
    // asymmetric matrix can place another item above self-similarity, so
    // skipping rank 0 would be wrong.
    let recommendations = ranked
        .into_iter()
        .filter(|&(column, _)| column != row)
        .take(k)
        .filter_map(|(column, score)| {
            catalog.get(column).map(|item| Recommendation {
                id: item.id,
                title: item.title.clone(),
                score,
            })
        })
        .collect();

    Ok(recommendations)
}
