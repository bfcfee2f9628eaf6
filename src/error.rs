use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::MovieId;

/// Fatal errors raised while loading the catalog and similarity artifacts.
///
/// These abort startup; none of them is recoverable per-request.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Similarity matrix is not square: row {row} has {len} columns, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("Similarity matrix dimension {matrix} does not match catalog length {catalog}")]
    DimensionMismatch { matrix: usize, catalog: usize },
}

/// Per-request application errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Unknown title: {0}")]
    UnknownTitle(String),

    #[error("Unknown movie id: {0}")]
    UnknownMovie(MovieId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::UnknownTitle(_) | AppError::UnknownMovie(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
