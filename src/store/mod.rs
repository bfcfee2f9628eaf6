pub mod catalog;
pub mod matrix;

pub use catalog::CatalogStore;
pub use matrix::SimilarityMatrix;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::LoadError;
use crate::models::MovieRecord;

/// Loads the catalog and similarity artifacts from disk.
///
/// This is a one-time blocking startup step: both artifacts are read,
/// parsed, shape-checked, and cross-validated (matrix dimension must equal
/// catalog length). Any failure is fatal; callers must not serve requests
/// after a load error, and must not retry per request.
pub fn load(
    catalog_path: &Path,
    similarity_path: &Path,
) -> Result<(CatalogStore, SimilarityMatrix), LoadError> {
    let records: Vec<MovieRecord> = read_json(catalog_path)?;
    let rows: Vec<Vec<f32>> = read_json(similarity_path)?;
    assemble(records, rows)
}

/// Builds and cross-validates the two stores from parsed artifact contents
pub fn assemble(
    records: Vec<MovieRecord>,
    rows: Vec<Vec<f32>>,
) -> Result<(CatalogStore, SimilarityMatrix), LoadError> {
    let similarity = SimilarityMatrix::from_rows(rows)?;
    let catalog = CatalogStore::from_records(records);

    if similarity.dimension() != catalog.len() {
        return Err(LoadError::DimensionMismatch {
            matrix: similarity.dimension(),
            catalog: catalog.len(),
        });
    }

    Ok((catalog, similarity))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieId;

    fn record(id: u64, title: &str) -> MovieRecord {
        MovieRecord {
            movie_id: MovieId(id),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_assemble_aligned_artifacts() {
        let (catalog, similarity) = assemble(
            vec![record(1, "A"), record(2, "B")],
            vec![vec![1.0, 0.5], vec![0.5, 1.0]],
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(similarity.dimension(), 2);
    }

    #[test]
    fn test_assemble_rejects_dimension_mismatch() {
        let result = assemble(
            vec![record(1, "A"), record(2, "B"), record(3, "C")],
            vec![vec![1.0, 0.5], vec![0.5, 1.0]],
        );

        match result {
            Err(LoadError::DimensionMismatch { matrix, catalog }) => {
                assert_eq!(matrix, 2);
                assert_eq!(catalog, 3);
            }
            other => panic!("expected DimensionMismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_assemble_rejects_ragged_matrix_before_alignment_check() {
        let result = assemble(
            vec![record(1, "A"), record(2, "B")],
            vec![vec![1.0, 0.5, 0.1], vec![0.5, 1.0]],
        );

        assert!(matches!(result, Err(LoadError::NotSquare { .. })));
    }

    #[test]
    fn test_load_missing_artifact_is_io_error() {
        let result = load(
            Path::new("/nonexistent/movies.json"),
            Path::new("/nonexistent/similarity.json"),
        );

        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
