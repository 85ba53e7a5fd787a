//! Profile-parametrized shortest-path search.
//!
//! One search routine serves every profile: the profile supplies the edge
//! cost function and selects between A* (hop-count heuristic) and
//! Dijkstra. Costs are computed from an explicit [`LiveStatus`] snapshot,
//! so a search is a pure function of its inputs.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use tracing::{debug, trace};

use crate::domain::{Profile, RoutePlan, Transfer};
use crate::graph::{EdgeId, NodeId, StationGraph};
use crate::status::LiveStatus;

use super::config::CostConfig;
use super::profile::Algorithm;
use super::rank::arbitrate;

/// Error from route search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Station is not a node of the graph
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// No profile found a connecting path
    #[error("no route from {origin} to {destination}")]
    NoRoute { origin: String, destination: String },
}

/// A walk through the graph: `nodes.len() == edges.len() + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Walk {
    nodes: Vec<NodeId>,
    edges: Vec<EdgeId>,
}

/// Hop distance from every node to `target`, `None` when unreachable.
pub fn hop_distances(graph: &StationGraph, target: NodeId) -> Vec<Option<u32>> {
    let mut hops = vec![None; graph.node_count()];
    let mut queue = VecDeque::new();

    hops[target.0] = Some(0);
    queue.push_back(target);

    while let Some(node) = queue.pop_front() {
        let next_hops = hops[node.0].unwrap_or_default() + 1;
        for (_, edge) in graph.incident(node) {
            let next = edge.other(node);
            if hops[next.0].is_none() {
                hops[next.0] = Some(next_hops);
                queue.push_back(next);
            }
        }
    }

    hops
}

/// Route search over a fixed graph, status snapshot and cost table.
pub struct RouteSearch<'a> {
    graph: &'a StationGraph,
    status: &'a LiveStatus,
    costs: &'a CostConfig,
}

impl<'a> RouteSearch<'a> {
    pub fn new(graph: &'a StationGraph, status: &'a LiveStatus, costs: &'a CostConfig) -> Self {
        Self {
            graph,
            status,
            costs,
        }
    }

    /// Search one profile.
    ///
    /// `hops` must be [`hop_distances`] towards `destination`. Returns `None`
    /// when the profile finds no path.
    pub fn search_profile(
        &self,
        profile: Profile,
        origin: NodeId,
        destination: NodeId,
        hops: &[Option<u32>],
    ) -> Option<RoutePlan> {
        let walk = self.shortest_walk(profile, origin, destination, hops)?;

        let estimated_cost = walk
            .edges
            .iter()
            .map(|&id| self.cost(profile, id))
            .fold(0u32, u32::saturating_add);

        let plan = RoutePlan {
            origin: self.graph.name(origin).to_string(),
            destination: self.graph.name(destination).to_string(),
            profile,
            path: walk
                .nodes
                .iter()
                .map(|&n| self.graph.name(n).to_string())
                .collect(),
            estimated_cost,
            transfers: self.detect_transfers(&walk),
        };

        trace!(
            profile = %profile,
            hops = plan.hop_count(),
            cost = plan.estimated_cost,
            transfers = plan.transfers.len(),
            "Profile search found a path"
        );

        Some(plan)
    }

    fn cost(&self, profile: Profile, edge: EdgeId) -> u32 {
        profile.edge_cost(self.graph, self.graph.edge(edge), self.status, self.costs)
    }

    /// Best-first search from `origin` to `destination`.
    ///
    /// Dijkstra is A* with a zero heuristic. The hop heuristic is consistent
    /// (every edge costs at least the base travel time), so a node is final
    /// the first time it is popped. Ties in the queue are broken by
    /// insertion order, which makes the result deterministic.
    fn shortest_walk(
        &self,
        profile: Profile,
        origin: NodeId,
        destination: NodeId,
        hops: &[Option<u32>],
    ) -> Option<Walk> {
        // Unreachable origin: no profile can succeed.
        hops[origin.0]?;

        if origin == destination {
            return Some(Walk {
                nodes: vec![origin],
                edges: Vec::new(),
            });
        }

        let base = self.costs.base_travel_time;
        let heuristic = |node: NodeId| -> Option<u32> {
            let remaining = hops[node.0]?;
            Some(match profile.algorithm() {
                Algorithm::AStar => remaining.saturating_mul(base),
                Algorithm::Dijkstra => 0,
            })
        };

        let n = self.graph.node_count();
        let mut dist: Vec<Option<u32>> = vec![None; n];
        let mut parent: Vec<Option<(NodeId, EdgeId)>> = vec![None; n];
        let mut settled = vec![false; n];
        let mut queue = BinaryHeap::new();
        let mut seq: u64 = 0;

        dist[origin.0] = Some(0);
        queue.push(Reverse((heuristic(origin)?, seq, origin)));

        while let Some(Reverse((_, _, node))) = queue.pop() {
            if settled[node.0] {
                continue;
            }
            settled[node.0] = true;

            if node == destination {
                return Some(self.reconstruct(&parent, origin, destination));
            }

            let so_far = dist[node.0].unwrap_or_default();
            for (edge_id, edge) in self.graph.incident(node) {
                let next = edge.other(node);
                if settled[next.0] {
                    continue;
                }
                let Some(estimate) = heuristic(next) else {
                    continue;
                };

                let candidate = so_far.saturating_add(self.cost(profile, edge_id));
                if dist[next.0].is_none_or(|d| candidate < d) {
                    dist[next.0] = Some(candidate);
                    parent[next.0] = Some((node, edge_id));
                    seq += 1;
                    queue.push(Reverse((candidate.saturating_add(estimate), seq, next)));
                }
            }
        }

        None
    }

    fn reconstruct(
        &self,
        parent: &[Option<(NodeId, EdgeId)>],
        origin: NodeId,
        destination: NodeId,
    ) -> Walk {
        let mut nodes = vec![destination];
        let mut edges = Vec::new();
        let mut current = destination;

        while current != origin {
            let Some((prev, edge)) = parent[current.0] else {
                break;
            };
            nodes.push(prev);
            edges.push(edge);
            current = prev;
        }

        nodes.reverse();
        edges.reverse();
        Walk { nodes, edges }
    }

    /// Points along the walk where the line changes between consecutive
    /// edges, recorded at the shared station.
    fn detect_transfers(&self, walk: &Walk) -> Vec<Transfer> {
        walk.edges
            .windows(2)
            .enumerate()
            .filter_map(|(idx, pair)| {
                let before = self.graph.edge(pair[0]);
                let after = self.graph.edge(pair[1]);
                (before.line != after.line).then(|| Transfer {
                    station: self.graph.name(walk.nodes[idx + 1]).to_string(),
                    from_line: before.line.clone(),
                    to_line: after.line.clone(),
                })
            })
            .collect()
    }
}

/// Multi-profile route planner.
///
/// Runs every profile over the same graph and status snapshot and keeps
/// the cheapest plan.
pub struct Planner<'a> {
    graph: &'a StationGraph,
    search: RouteSearch<'a>,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a StationGraph, status: &'a LiveStatus, costs: &'a CostConfig) -> Self {
        Self {
            graph,
            search: RouteSearch::new(graph, status, costs),
        }
    }

    /// Plan a route between two canonical station names.
    ///
    /// A profile that finds no path is skipped; the call only fails when
    /// every profile does.
    pub fn plan(&self, origin: &str, destination: &str) -> Result<RoutePlan, SearchError> {
        let from = self
            .graph
            .node(origin)
            .ok_or_else(|| SearchError::UnknownStation(origin.to_string()))?;
        let to = self
            .graph
            .node(destination)
            .ok_or_else(|| SearchError::UnknownStation(destination.to_string()))?;

        let hops = hop_distances(self.graph, to);

        let plans: Vec<RoutePlan> = Profile::ALL
            .into_iter()
            .filter_map(|profile| {
                let plan = self.search.search_profile(profile, from, to, &hops);
                if plan.is_none() {
                    debug!(profile = %profile, origin, destination, "No path for profile");
                }
                plan
            })
            .collect();

        let best = arbitrate(plans).ok_or_else(|| SearchError::NoRoute {
            origin: origin.to_string(),
            destination: destination.to_string(),
        })?;

        debug!(
            origin,
            destination,
            profile = %best.profile,
            cost = best.estimated_cost,
            "Selected route"
        );

        Ok(best)
    }
}
