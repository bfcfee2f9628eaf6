use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client as HttpClient;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::models::MovieId;

/// Poster lookup abstraction
///
/// Maps a movie id to a displayable image URL. Implementations must absorb
/// every upstream failure and hand back a placeholder instead; callers never
/// see an error from this boundary.
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Resolve a movie id to a poster URL, falling back to a fixed
    /// placeholder on any failure
    async fn fetch_poster(&self, movie_id: MovieId) -> String;
}

/// A resolved poster URL held for the process lifetime
struct CachedPoster {
    url: String,
    #[allow(dead_code)] // Kept for cache inspection/debugging
    cached_at: DateTime<Utc>,
}

/// TMDB-backed poster provider with an in-process, per-id cache.
///
/// Movie ids are immutable and the upstream image rarely changes, so the
/// cache is unbounded and never invalidated. Concurrent writes of the same
/// key are idempotent; last write wins.
pub struct TmdbPosterClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
    fallback_url: String,
    cache: RwLock<HashMap<MovieId, CachedPoster>>,
}

impl TmdbPosterClient {
    /// Creates a poster client with a bounded per-request timeout
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.poster_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.clone(),
            image_base_url: config.image_base_url.clone(),
            fallback_url: config.fallback_poster_url.clone(),
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Fetches the poster path from TMDB, returning None on any failure
    async fn fetch_from_api(&self, movie_id: MovieId) -> Option<String> {
        let url = format!("{}/3/movie/{}", self.api_url, movie_id);

        let response = match self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", "en-US")])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, movie_id = %movie_id, "Poster metadata request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                status = %response.status(),
                movie_id = %movie_id,
                "Poster metadata request returned error status"
            );
            return None;
        }

        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, movie_id = %movie_id, "Failed to parse poster metadata");
                return None;
            }
        };

        poster_url_from_metadata(&body, &self.image_base_url)
    }
}

/// Extracts the poster URL from a TMDB movie-details body.
///
/// `poster_path` is optional in the response; absence means no poster.
pub(crate) fn poster_url_from_metadata(
    body: &serde_json::Value,
    image_base_url: &str,
) -> Option<String> {
    body.get("poster_path")
        .and_then(serde_json::Value::as_str)
        .map(|path| format!("{}{}", image_base_url, path))
}

#[async_trait::async_trait]
impl PosterProvider for TmdbPosterClient {
    async fn fetch_poster(&self, movie_id: MovieId) -> String {
        if let Some(hit) = self.cache.read().await.get(&movie_id) {
            return hit.url.clone();
        }

        let url = match self.fetch_from_api(movie_id).await {
            Some(url) => url,
            None => {
                tracing::debug!(movie_id = %movie_id, "Falling back to placeholder poster");
                self.fallback_url.clone()
            }
        };

        self.cache.write().await.insert(
            movie_id,
            CachedPoster {
                url: url.clone(),
                cached_at: Utc::now(),
            },
        );

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    fn test_client(api_url: &str, timeout_secs: u64) -> TmdbPosterClient {
        TmdbPosterClient {
            http_client: HttpClient::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap(),
            api_key: "test_key".to_string(),
            api_url: api_url.to_string(),
            image_base_url: IMAGE_BASE.to_string(),
            fallback_url: "https://via.placeholder.com/500x750?text=No+Poster".to_string(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    #[test]
    fn test_poster_url_from_metadata_present() {
        let body = json!({ "poster_path": "/abc123.jpg" });
        assert_eq!(
            poster_url_from_metadata(&body, IMAGE_BASE),
            Some("https://image.tmdb.org/t/p/w500/abc123.jpg".to_string())
        );
    }

    #[test]
    fn test_poster_url_from_metadata_absent() {
        let body = json!({ "title": "Inception" });
        assert_eq!(poster_url_from_metadata(&body, IMAGE_BASE), None);
    }

    #[test]
    fn test_poster_url_from_metadata_null() {
        let body = json!({ "poster_path": null });
        assert_eq!(poster_url_from_metadata(&body, IMAGE_BASE), None);
    }

    #[tokio::test]
    async fn test_network_failure_returns_fallback() {
        // Connection refused locally; must resolve to the placeholder.
        let client = test_client("http://127.0.0.1:9", 1);

        let url = client.fetch_poster(MovieId(27205)).await;
        assert_eq!(url, client.fallback_url);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_network() {
        let client = test_client("http://127.0.0.1:9", 1);

        client.cache.write().await.insert(
            MovieId(27205),
            CachedPoster {
                url: "https://image.tmdb.org/t/p/w500/cached.jpg".to_string(),
                cached_at: Utc::now(),
            },
        );

        let url = client.fetch_poster(MovieId(27205)).await;
        assert_eq!(url, "https://image.tmdb.org/t/p/w500/cached.jpg");
    }

    #[tokio::test]
    async fn test_failure_result_is_cached() {
        let client = test_client("http://127.0.0.1:9", 1);

        let _ = client.fetch_poster(MovieId(42)).await;
        let cache = client.cache.read().await;
        assert_eq!(
            cache.get(&MovieId(42)).map(|c| c.url.as_str()),
            Some(client.fallback_url.as_str())
        );
    }
}
