use std::path::Path;
use std::sync::Arc;

use marquee_api::api::{create_router, AppState};
use marquee_api::config::Config;
use marquee_api::services::posters::TmdbPosterClient;
use marquee_api::store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_api=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    // One-time blocking load of the catalog and similarity artifacts.
    // Any failure here is fatal; the server must not start with bad data.
    let (catalog, similarity) = store::load(
        Path::new(&config.catalog_path),
        Path::new(&config.similarity_path),
    )?;

    tracing::info!(
        movies = catalog.len(),
        dimension = similarity.dimension(),
        "Catalog and similarity matrix loaded"
    );

    let posters = TmdbPosterClient::new(&config)?;
    let state = AppState::new(catalog, similarity, Arc::new(posters));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
