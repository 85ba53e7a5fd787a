//! Routing engine.
//!
//! Owns the memoized network and the live status overlay, and exposes the
//! two operations the conversation layer calls: plan a route between two
//! free-text station names, and list every known station.

use std::sync::Arc;

use tracing::info;

use crate::cache::{NetworkCache, NetworkConfig};
use crate::domain::RoutePlan;
use crate::planner::{CostConfig, Planner, SearchError};
use crate::resolver::{DEFAULT_MATCH_THRESHOLD, StationResolver};
use crate::status::{LiveStatus, LiveStatusOverlay, OverlayConfig, StatusSource};
use crate::topology::TopologySource;

/// Errors surfaced to callers of the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// A raw name matched no station, exactly or approximately
    #[error("station not found: {name}. Please clarify the station name")]
    StationNotFound { name: String },

    /// No profile found a path between the stations
    #[error("no route available from {origin} to {destination}")]
    NoRouteFound { origin: String, destination: String },

    /// The topology could not be loaded
    #[error("network data unavailable: {0}")]
    DataUnavailable(String),
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Edge cost constants.
    pub costs: CostConfig,

    /// Minimum similarity for approximate station name matches.
    pub match_threshold: f64,

    /// Live status memoization.
    pub status: OverlayConfig,
}

impl EngineConfig {
    /// Set the station name match threshold.
    pub fn with_match_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    /// Set the live status memoization.
    pub fn with_status(mut self, status: OverlayConfig) -> Self {
        self.status = status;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            costs: CostConfig::default(),
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            status: OverlayConfig::default(),
        }
    }
}

/// Multi-profile routing engine over a topology and a live status source.
pub struct RoutingEngine<T, S> {
    network: NetworkCache<T>,
    status: LiveStatusOverlay<S>,
    costs: CostConfig,
}

impl<T: TopologySource, S: StatusSource> RoutingEngine<T, S> {
    /// Create a new engine. Nothing is loaded or fetched until first use.
    pub fn new(topology: T, status_source: S, config: EngineConfig) -> Self {
        let network = NetworkCache::new(
            topology,
            NetworkConfig {
                travel_time: config.costs.base_travel_time,
                match_threshold: config.match_threshold,
            },
        );

        Self {
            network,
            status: LiveStatusOverlay::new(status_source, &config.status),
            costs: config.costs,
        }
    }

    /// Plan the best route between two free-text station names.
    pub async fn plan_route(&self, origin: &str, destination: &str) -> Result<RoutePlan, RouteError> {
        let (network, status) = tokio::join!(self.network.get(), self.status.snapshot());
        let network = network.map_err(|e| RouteError::DataUnavailable(e.to_string()))?;

        let from = resolve(&network.resolver, origin)?;
        let to = resolve(&network.resolver, destination)?;

        let plan = Planner::new(&network.graph, &status, &self.costs)
            .plan(from, to)
            .map_err(|e| match e {
                SearchError::NoRoute {
                    origin,
                    destination,
                } => RouteError::NoRouteFound {
                    origin,
                    destination,
                },
                SearchError::UnknownStation(name) => RouteError::StationNotFound { name },
            })?;

        info!(
            origin = %plan.origin,
            destination = %plan.destination,
            profile = %plan.profile,
            cost = plan.estimated_cost,
            transfers = plan.transfers.len(),
            "Planned route"
        );

        Ok(plan)
    }

    /// Every known station name, sorted and de-duplicated.
    pub async fn list_stations(&self) -> Result<Vec<String>, RouteError> {
        let network = self
            .network
            .get()
            .await
            .map_err(|e| RouteError::DataUnavailable(e.to_string()))?;
        Ok(network.stations.clone())
    }

    /// Current live status snapshot, fetching it on first use.
    pub async fn live_status(&self) -> Arc<LiveStatus> {
        self.status.snapshot().await
    }

    /// Refetch the live status now. Never fails; see [`LiveStatusOverlay::refresh`].
    pub async fn refresh_status(&self) -> Arc<LiveStatus> {
        self.status.refresh().await
    }

    /// Drop the cached network so the next call reloads the topology.
    pub async fn invalidate_network(&self) {
        self.network.invalidate().await;
    }

    /// Access the live status overlay.
    pub fn status(&self) -> &LiveStatusOverlay<S> {
        &self.status
    }
}

fn resolve<'a>(resolver: &'a StationResolver, raw: &str) -> Result<&'a str, RouteError> {
    resolver
        .resolve(raw)
        .ok_or_else(|| RouteError::StationNotFound {
            name: raw.trim().to_string(),
        })
}
