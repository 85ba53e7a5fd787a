use std::net::SocketAddr;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use transit_planner::engine::{EngineConfig, RoutingEngine};
use transit_planner::status::{StatusClient, StatusClientConfig};
use transit_planner::topology::JsonFileTopology;
use transit_planner::web::{AppState, LiveEngine, create_router};

/// Read an environment variable, falling back when it is unset or unparsable.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "Ignoring unparsable setting");
            default
        }),
        Err(_) => default,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Topology file
    let topology = match std::env::var("TOPOLOGY_PATH") {
        Ok(path) => JsonFileTopology::new(path),
        Err(_) => JsonFileTopology::default(),
    };
    info!(path = %topology.path().display(), "Using topology file");

    // Live status client
    let mut status_config = StatusClientConfig::default();
    if let Ok(url) = std::env::var("STATUS_URL") {
        status_config = StatusClientConfig::new(url);
    }
    let status_config = status_config.with_timeout(env_or("STATUS_TIMEOUT_SECS", 5));
    let status_client = StatusClient::new(status_config).expect("Failed to create status client");

    // Optional periodic refresh
    let refresh_secs: Option<u64> = std::env::var("STATUS_REFRESH_SECS")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .filter(|&secs| secs > 0);

    let engine: LiveEngine = RoutingEngine::new(topology, status_client, EngineConfig::default());
    let state = AppState::new(engine);

    // Load the network (fail fast if unavailable)
    let stations = state
        .engine
        .list_stations()
        .await
        .expect("Failed to load network topology");
    info!(stations = stations.len(), "Loaded station network");

    // Spawn background task to refresh live status
    if let Some(secs) = refresh_secs {
        let engine = state.engine.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(secs));
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                let status = engine.refresh_status().await;
                info!(lines = status.len(), "Refreshed live status");
            }
        });
    }

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = env_or("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)));
    info!(%addr, "Route planner listening");
    info!("  GET  /health          - Health check");
    info!("  GET  /stations        - List stations");
    info!("  POST /route/plan      - Plan a route");
    info!("  POST /status/refresh  - Refresh live status");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
