//! Caching layer for the static network.
//!
//! Loading the topology, building the graph and indexing station names for
//! the resolver happen once, on first use. Concurrent first callers wait
//! for the same build instead of each doing their own. A failed build is
//! not cached: the next caller tries again.

use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tracing::info;

use crate::graph::StationGraph;
use crate::resolver::StationResolver;
use crate::topology::{TopologyError, TopologySource, station_names};

/// Everything derived from the topology dataset.
#[derive(Debug)]
pub struct Network {
    /// Station graph with one node per station and one edge per segment.
    pub graph: StationGraph,

    /// Fuzzy name resolver over every known station.
    pub resolver: StationResolver,

    /// Sorted, de-duplicated station names.
    pub stations: Vec<String>,
}

/// Configuration for building the network.
#[derive(Debug, Clone, Copy)]
pub struct NetworkConfig {
    /// Travel time assigned to every edge.
    pub travel_time: u32,

    /// Minimum similarity for approximate name matches.
    pub match_threshold: f64,
}

/// Build-once cache over a [`TopologySource`].
pub struct NetworkCache<T> {
    topology: T,
    config: NetworkConfig,
    network: MokaCache<(), Arc<Network>>,
}

impl<T: TopologySource> NetworkCache<T> {
    /// Create a new cache. Nothing is loaded until first use.
    pub fn new(topology: T, config: NetworkConfig) -> Self {
        Self {
            topology,
            config,
            network: MokaCache::builder().max_capacity(1).build(),
        }
    }

    /// The network, building it on first use.
    pub async fn get(&self) -> Result<Arc<Network>, Arc<TopologyError>> {
        self.network.try_get_with((), async { self.build() }).await
    }

    /// Drop the cached network; the next caller reloads the topology.
    pub async fn invalidate(&self) {
        self.network.invalidate(&()).await;
    }

    /// Access the underlying topology source.
    pub fn topology(&self) -> &T {
        &self.topology
    }

    fn build(&self) -> Result<Arc<Network>, TopologyError> {
        let lines = self.topology.load()?;
        let graph = StationGraph::build(&lines, self.config.travel_time);
        let stations = station_names(&lines);
        let resolver = StationResolver::new(&stations, self.config.match_threshold);

        info!(
            lines = lines.len(),
            stations = graph.node_count(),
            names = resolver.len(),
            segments = graph.edge_count(),
            "Built station network"
        );

        Ok(Arc::new(Network {
            graph,
            resolver,
            stations,
        }))
    }
}
