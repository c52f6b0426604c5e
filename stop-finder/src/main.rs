use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stop_finder::cache::CachedSource;
use stop_finder::config::ServerConfig;
use stop_finder::resrobot::{CannedSource, FallbackSource, ResRobotClient};
use stop_finder::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env()?;

    // Canned data is served straight, never cached; live answers are cached
    // before the fallback sees them.
    let state = match config.resrobot() {
        Some(resrobot) => {
            let client = ResRobotClient::new(resrobot)?;
            let cached = CachedSource::new(client, &config.cache());
            if config.fallback {
                AppState::new(FallbackSource::new(cached))
            } else {
                AppState::new(cached)
            }
        }
        None => {
            warn!("RESROBOT_API_KEY not set, serving canned data only");
            AppState::new(CannedSource)
        }
    };

    let app = create_router(state, config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Stop finder listening on http://{}", config.addr);
    info!("API Endpoints:");
    info!("  GET /health                 - Health check");
    info!("  GET /api/nearby-stops       - Stops near lat/lng");
    info!("  GET /api/departures         - Departure board for stopId");
    info!("  GET /api/journey-detail     - Stops of a journey by ref");
    info!("  GET /api/selection          - Nearest stop, Nth bus, arrival time");
    info!("  GET /api/selection/current  - Selection on display");

    axum::serve(listener, app).await?;
    Ok(())
}
