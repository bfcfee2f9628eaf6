use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::error::{AppError, AppResult};
use crate::models::{CatalogItem, MovieId, Recommendation};
use crate::services::recommender::{self, DEFAULT_K};

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub movie_id: MovieId,
    pub title: String,
}

impl From<&CatalogItem> for MovieResponse {
    fn from(item: &CatalogItem) -> Self {
        Self {
            movie_id: item.id,
            title: item.title.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub title: Option<String>,
    pub movie_id: Option<MovieId>,
    pub k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub movie_id: MovieId,
    pub title: String,
    pub poster_url: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Lists every catalog movie in row order, for populating a selection input
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<MovieResponse>> {
    let movies: Vec<MovieResponse> = state.catalog.items().iter().map(MovieResponse::from).collect();
    Json(movies)
}

/// Returns the top-k movies similar to the selected one, with poster URLs.
///
/// Accepts either `title` (exact match) or `movie_id`; `title` wins when
/// both are present. Posters are resolved concurrently, one bounded fetch
/// per result row, and the ranked order is preserved.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationParams>,
) -> AppResult<Json<Vec<RecommendationResponse>>> {
    let k = params.k.unwrap_or(DEFAULT_K);

    let recommendations = match (&params.title, params.movie_id) {
        (Some(title), _) => {
            recommender::recommend(&state.catalog, &state.similarity, title, k)?
        }
        (None, Some(movie_id)) => {
            recommender::recommend_by_id(&state.catalog, &state.similarity, movie_id, k)?
        }
        (None, None) => {
            return Err(AppError::InvalidInput(
                "Either title or movie_id is required".to_string(),
            ));
        }
    };

    tracing::info!(
        k,
        results = recommendations.len(),
        "Recommendations computed"
    );

    let posters = fetch_posters(&state, &recommendations).await;

    let body = recommendations
        .into_iter()
        .zip(posters)
        .map(|(rec, poster_url)| RecommendationResponse {
            movie_id: rec.id,
            title: rec.title,
            poster_url,
        })
        .collect();

    Ok(Json(body))
}

/// Fetches a poster per recommendation concurrently, preserving order.
///
/// Each fetch is independent and already timeout-bounded inside the
/// provider, so total latency is roughly one fetch rather than k.
async fn fetch_posters(
    state: &AppState,
    recommendations: &[Recommendation],
) -> Vec<String> {
    let mut tasks = JoinSet::new();

    for (index, rec) in recommendations.iter().enumerate() {
        let posters = state.posters.clone();
        let movie_id = rec.id;
        tasks.spawn(async move { (index, posters.fetch_poster(movie_id).await) });
    }

    let mut urls = vec![String::new(); recommendations.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, url)) => urls[index] = url,
            Err(e) => tracing::error!(error = %e, "Poster fetch task failed"),
        }
    }

    urls
}
