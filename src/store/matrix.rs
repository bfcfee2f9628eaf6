use crate::error::LoadError;

/// Immutable N×N dense matrix of pairwise similarity scores.
///
/// Higher scores mean more similar. Symmetry is not assumed; the matrix is
/// used row-wise only. Row `i` is aligned with row `i` of the catalog.
pub struct SimilarityMatrix {
    dimension: usize,
    rows: Vec<Vec<f32>>,
}

impl SimilarityMatrix {
    /// Validates squareness and wraps the raw rows.
    ///
    /// The dimension is the number of rows; every row must have exactly that
    /// many columns or the artifact is rejected.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, LoadError> {
        let dimension = rows.len();

        for (row, scores) in rows.iter().enumerate() {
            if scores.len() != dimension {
                return Err(LoadError::NotSquare {
                    row,
                    len: scores.len(),
                    expected: dimension,
                });
            }
        }

        Ok(Self { dimension, rows })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Similarity scores of row `i` against every catalog item, self included
    pub fn row(&self, i: usize) -> &[f32] {
        &self.rows[i]
    }
}
