//! Per-profile edge costs and algorithm choice.

use crate::domain::Profile;
use crate::graph::{Edge, StationGraph};
use crate::status::LiveStatus;

use super::config::CostConfig;

/// Shortest-path algorithm used by a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Heuristic-guided, with remaining hops × base travel time as the
    /// estimate. Only admissible when every edge costs at least the base
    /// travel time and no cost depends on transfers.
    AStar,
    /// Plain Dijkstra, correct for any non-negative edge weights.
    Dijkstra,
}

impl Profile {
    /// The search algorithm for this profile.
    ///
    /// The transfer-averse profile's penalty is not consistent with the
    /// hop-count heuristic, so it must use Dijkstra.
    pub fn algorithm(self) -> Algorithm {
        match self {
            Profile::Fast | Profile::Accessible => Algorithm::AStar,
            Profile::Simple => Algorithm::Dijkstra,
        }
    }

    /// Cost of traversing an edge under this profile.
    pub fn edge_cost(
        self,
        graph: &StationGraph,
        edge: &Edge,
        status: &LiveStatus,
        costs: &CostConfig,
    ) -> u32 {
        let base = edge.travel_time + disruption_penalty(&edge.line, status, costs);
        match self {
            Profile::Fast => base,
            Profile::Simple => {
                if graph.is_transfer(edge.a) || graph.is_transfer(edge.b) {
                    base + costs.transfer_penalty
                } else {
                    base
                }
            }
            Profile::Accessible => base + costs.accessibility_penalty,
        }
    }
}

/// Extra cost for riding a line whose live situation reports degraded
/// service; zero when the line has no status entry.
pub fn disruption_penalty(line: &str, status: &LiveStatus, costs: &CostConfig) -> u32 {
    match status.situation(line) {
        Some(situation) if costs.is_degraded(situation) => costs.disruption_penalty,
        _ => 0,
    }
}
