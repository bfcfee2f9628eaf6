use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Stable TMDB identifier for a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the persisted catalog artifact
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub movie_id: MovieId,
    pub title: String,
}

/// A catalog entry held in memory.
///
/// `row_index` is stored explicitly at load time so a misaligned lookup
/// against the similarity matrix is detectable rather than silent.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub id: MovieId,
    pub title: String,
    pub row_index: usize,
}

/// A single ranked recommendation produced by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub id: MovieId,
    pub title: String,
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_id_display() {
        let id = MovieId(27205);
        assert_eq!(format!("{}", id), "27205");
    }

    #[test]
    fn test_movie_id_serde_transparent() {
        let id = MovieId(27205);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "27205");

        let deserialized: MovieId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn test_movie_record_deserialization() {
        let json = r#"{
            "movie_id": 27205,
            "title": "Inception"
        }"#;

        let record: MovieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.movie_id, MovieId(27205));
        assert_eq!(record.title, "Inception");
    }

    #[test]
    fn test_catalog_artifact_deserializes_as_row_aligned_list() {
        let json = r#"[
            {"movie_id": 1, "title": "A"},
            {"movie_id": 2, "title": "B"}
        ]"#;

        let records: Vec<MovieRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "A");
        assert_eq!(records[1].movie_id, MovieId(2));
    }
}
