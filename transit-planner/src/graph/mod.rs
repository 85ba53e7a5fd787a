//! Undirected weighted station graph.
//!
//! Nodes are canonical station names (the display strings from the
//! topology). Each pair of consecutive stations on a line becomes an edge
//! tagged with the line, its operator and a base travel time. A station
//! touched by two or more distinct lines is a transfer station.
//!
//! The graph is read-only after construction; see [`crate::cache`] for
//! how it is memoized.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace};

use crate::domain::Line;

/// Index of a station in a [`StationGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Index of an edge in a [`StationGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub usize);

/// A connection between two consecutive stations on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    pub travel_time: u32,
    pub line: String,
    pub operator: Option<String>,
}

impl Edge {
    /// The endpoint opposite `node`.
    pub fn other(&self, node: NodeId) -> NodeId {
        if self.a == node { self.b } else { self.a }
    }
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    lines: BTreeSet<String>,
}

/// Station graph built from the topology.
#[derive(Debug, Clone, Default)]
pub struct StationGraph {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<EdgeId>>,
    pairs: HashMap<(NodeId, NodeId), EdgeId>,
}

impl StationGraph {
    /// Build the graph from a set of lines.
    ///
    /// Every station becomes a node, even one served by a single-station
    /// line. When two lines share the same consecutive pair, there is one
    /// edge and the later line's tags win; both lines still count towards
    /// the endpoints' line sets.
    pub fn build(lines: &[Line], travel_time: u32) -> Self {
        let mut graph = Self::default();

        for line in lines {
            for station in &line.stations {
                graph.add_node(station);
            }

            for (from, to) in line.segments() {
                let a = graph.add_node(from);
                let b = graph.add_node(to);
                if a == b {
                    trace!(line = %line.name, station = from, "Ignoring self-loop segment");
                    continue;
                }

                graph.nodes[a.0].lines.insert(line.name.clone());
                graph.nodes[b.0].lines.insert(line.name.clone());

                let edge = Edge {
                    a,
                    b,
                    travel_time,
                    line: line.name.clone(),
                    operator: line.operator.clone(),
                };
                graph.upsert_edge(edge);
            }
        }

        debug!(
            stations = graph.node_count(),
            edges = graph.edge_count(),
            transfers = graph.transfer_stations().count(),
            "Built station graph"
        );

        graph
    }

    fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            lines: BTreeSet::new(),
        });
        self.adjacency.push(Vec::new());
        self.index.insert(name.to_string(), id);
        id
    }

    fn upsert_edge(&mut self, edge: Edge) {
        let key = pair_key(edge.a, edge.b);
        if let Some(&existing) = self.pairs.get(&key) {
            self.edges[existing.0] = edge;
            return;
        }

        let id = EdgeId(self.edges.len());
        self.adjacency[edge.a.0].push(id);
        self.adjacency[edge.b.0].push(id);
        self.edges.push(edge);
        self.pairs.insert(key, id);
    }

    /// Look up a station by its canonical name.
    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Canonical name of a station.
    pub fn name(&self, node: NodeId) -> &str {
        &self.nodes[node.0].name
    }

    /// Distinct lines touching a station.
    pub fn lines_at(&self, node: NodeId) -> &BTreeSet<String> {
        &self.nodes[node.0].lines
    }

    /// Whether a station is served by two or more distinct lines.
    pub fn is_transfer(&self, node: NodeId) -> bool {
        self.nodes[node.0].lines.len() >= 2
    }

    /// All transfer stations.
    pub fn transfer_stations(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes().filter(|&n| self.is_transfer(n))
    }

    /// Get an edge by id.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// Edges incident on a station, in insertion order.
    pub fn incident(&self, node: NodeId) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.adjacency[node.0]
            .iter()
            .map(move |&id| (id, &self.edges[id.0]))
    }

    /// The edge joining two stations, if any.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        self.pairs.get(&pair_key(a, b)).map(|id| &self.edges[id.0])
    }

    /// Iterate over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Iterate over all canonical station names.
    pub fn station_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }

    /// Iterate over all edges.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

fn pair_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_lines() -> Vec<Line> {
        vec![
            Line::new("L1", Some("Metro".to_string()), ["A", "B", "C"]),
            Line::new("L2", Some("CPTM".to_string()), ["C", "D", "E"]),
        ]
    }

    #[test]
    fn builds_edges_between_consecutive_stations() {
        let graph = StationGraph::build(&two_lines(), 3);
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 4);

        let a = graph.node("A").unwrap();
        let b = graph.node("B").unwrap();
        let c = graph.node("C").unwrap();
        let edge = graph.edge_between(a, b).unwrap();
        assert_eq!(edge.line, "L1");
        assert_eq!(edge.operator.as_deref(), Some("Metro"));
        assert_eq!(edge.travel_time, 3);
        assert!(graph.edge_between(a, c).is_none());
    }

    #[test]
    fn edges_are_undirected() {
        let graph = StationGraph::build(&two_lines(), 3);
        let c = graph.node("C").unwrap();
        let d = graph.node("D").unwrap();
        assert_eq!(graph.edge_between(c, d), graph.edge_between(d, c));
    }

    #[test]
    fn marks_transfer_stations() {
        let graph = StationGraph::build(&two_lines(), 3);
        let c = graph.node("C").unwrap();
        let a = graph.node("A").unwrap();

        assert!(graph.is_transfer(c));
        assert!(!graph.is_transfer(a));
        assert_eq!(
            graph.lines_at(c).iter().cloned().collect::<Vec<_>>(),
            vec!["L1".to_string(), "L2".to_string()]
        );
        assert_eq!(graph.transfer_stations().collect::<Vec<_>>(), vec![c]);
    }

    #[test]
    fn isolated_station_is_a_node_without_edges() {
        let mut lines = two_lines();
        lines.push(Line::new("Shuttle", None, ["Z"]));
        let graph = StationGraph::build(&lines, 3);

        let z = graph.node("Z").unwrap();
        assert_eq!(graph.incident(z).count(), 0);
        assert!(!graph.is_transfer(z));
    }

    #[test]
    fn shared_segment_keeps_one_edge_with_later_line() {
        let lines = vec![
            Line::new("L1", None, ["A", "B"]),
            Line::new("L2", None, ["B", "A"]),
        ];
        let graph = StationGraph::build(&lines, 3);
        let a = graph.node("A").unwrap();
        let b = graph.node("B").unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_between(a, b).unwrap().line, "L2");
        assert!(graph.is_transfer(a));
        assert!(graph.is_transfer(b));
    }

    #[test]
    fn self_loop_segments_are_ignored() {
        let lines = vec![Line::new("L1", None, ["A", "A", "B"])];
        let graph = StationGraph::build(&lines, 3);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn rebuild_is_idempotent() {
        let first = StationGraph::build(&two_lines(), 3);
        let second = StationGraph::build(&two_lines(), 3);

        let names = |g: &StationGraph| {
            let mut v: Vec<String> = g.station_names().map(str::to_string).collect();
            v.sort();
            v
        };
        let edges = |g: &StationGraph| {
            let mut v: Vec<(String, String, String)> = g
                .edges()
                .map(|e| {
                    let (x, y) = (g.name(e.a).to_string(), g.name(e.b).to_string());
                    let (x, y) = if x <= y { (x, y) } else { (y, x) };
                    (x, y, e.line.clone())
                })
                .collect();
            v.sort();
            v
        };

        assert_eq!(names(&first), names(&second));
        assert_eq!(edges(&first), edges(&second));
    }

    #[test]
    fn edge_other_endpoint() {
        let graph = StationGraph::build(&two_lines(), 3);
        let a = graph.node("A").unwrap();
        let b = graph.node("B").unwrap();
        let edge = graph.edge_between(a, b).unwrap();
        assert_eq!(edge.other(a), b);
        assert_eq!(edge.other(b), a);
    }
}
