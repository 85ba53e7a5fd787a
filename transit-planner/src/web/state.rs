//! Application state for the web layer.

use std::sync::Arc;

use crate::engine::RoutingEngine;
use crate::status::StatusClient;
use crate::topology::JsonFileTopology;

/// Engine over the on-disk topology and the live status feed.
pub type LiveEngine = RoutingEngine<JsonFileTopology, StatusClient>;

/// Shared application state.
///
/// Generic over the engine's sources so the handlers can run against
/// fixture topologies in tests.
pub struct AppState<T, S> {
    /// Routing engine
    pub engine: Arc<RoutingEngine<T, S>>,
}

impl<T, S> AppState<T, S> {
    /// Create a new app state.
    pub fn new(engine: RoutingEngine<T, S>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

impl<T, S> Clone for AppState<T, S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}
