//! Route plan value types.

use std::fmt;

use serde::Serialize;

/// A named riding profile.
///
/// Each profile prices edges differently; the planner computes one
/// candidate route per profile and keeps the cheapest. Declaration order is
/// the tie-break priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Shortest travel time, disruption-aware.
    Fast,
    /// Transfer-averse.
    Simple,
    /// Step-free oriented; every edge carries an accessibility surcharge.
    Accessible,
}

impl Profile {
    /// All profiles in tie-break priority order.
    pub const ALL: [Profile; 3] = [Profile::Fast, Profile::Simple, Profile::Accessible];

    /// Lowercase profile name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Fast => "fast",
            Profile::Simple => "simple",
            Profile::Accessible => "accessible",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change of line at a station along a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transfer {
    /// Station where the change happens.
    pub station: String,
    /// Line ridden into the station.
    pub from_line: String,
    /// Line ridden out of the station.
    pub to_line: String,
}

/// A planned route between two canonical stations.
///
/// Invariants (established by the planner):
/// - consecutive stations in `path` share a graph edge
/// - `transfers` are in path order and each changes line
/// - `estimated_cost` is at least the number of edges in `path`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    pub origin: String,
    pub destination: String,
    pub profile: Profile,
    pub path: Vec<String>,
    pub estimated_cost: u32,
    pub transfers: Vec<Transfer>,
}

impl RoutePlan {
    /// Zero-length plan for a trip that starts where it ends.
    pub fn stationary(station: impl Into<String>, profile: Profile) -> Self {
        let station = station.into();
        Self {
            origin: station.clone(),
            destination: station.clone(),
            profile,
            path: vec![station],
            estimated_cost: 0,
            transfers: Vec::new(),
        }
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Whether the route is ridden on a single line.
    pub fn is_direct(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Estimated trip length in minutes.
    ///
    /// Never reports fewer minutes than hops, so that a heavily discounted
    /// cost cannot claim a trip shorter than its stop count.
    pub fn estimated_minutes(&self) -> u32 {
        let hops = u32::try_from(self.hop_count()).unwrap_or(u32::MAX);
        self.estimated_cost.max(hops)
    }
}
