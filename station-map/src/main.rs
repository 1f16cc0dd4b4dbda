use std::error::Error;

use station_map::cache::{CacheConfig, CachedFeed};
use station_map::classify::classify;
use station_map::config::AppConfig;
use station_map::gbfs::{FeedSource, GbfsClient, GbfsConfig, MockGbfsClient};
use station_map::render::Palette;
use station_map::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "station_map=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = AppConfig::from_env()?;

    // Pick the feed source
    let source = match &config.mock_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "serving station feeds from local files");
            FeedSource::from(MockGbfsClient::new(dir)?)
        }
        None => {
            info!(url = %config.feed_url, "using live station feeds");
            FeedSource::from(GbfsClient::new(GbfsConfig::new(&config.feed_url))?)
        }
    };

    let feed = CachedFeed::new(
        source,
        &CacheConfig {
            ttl: config.cache_ttl,
        },
    );

    // Warm the cache; a failure here is not fatal, the page will retry
    match feed.snapshot().await {
        Ok(snapshot) => {
            let result = classify(&snapshot.stations, &snapshot.statuses);
            let counts = result.counts();
            info!(
                total = result.total_stations(),
                coming_soon = counts.coming_soon,
                empty = counts.empty,
                out_of_order = counts.out_of_order,
                low = counts.low,
                healthy = counts.healthy,
                unmatched = result.unmatched().len(),
                "loaded station feeds"
            );
        }
        Err(e) => warn!(error = %e, "initial feed fetch failed"),
    }

    let state = AppState::new(feed, Palette::default(), config.map.clone(), config.timezone);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("Station map listening on http://{}", config.bind);
    info!("  GET  /              - Map");
    info!("  GET  /api/stations  - Stations by category");
    info!("  GET  /api/summary   - Category counts");
    info!("  GET  /health        - Health check");

    axum::serve(listener, app).await?;
    Ok(())
}
