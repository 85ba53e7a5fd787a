//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Profile, RoutePlan, Transfer};

/// Request to plan a route.
///
/// Both fields are optional so that a missing name is reported as a bad
/// request rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct PlanRouteRequest {
    /// Free-text origin station name
    #[serde(default, alias = "origem")]
    pub origin: Option<String>,

    /// Free-text destination station name
    #[serde(default, alias = "destino")]
    pub destination: Option<String>,
}

/// A planned route.
#[derive(Debug, Serialize)]
pub struct PlanRouteResponse {
    /// Canonical origin station
    pub origin: String,

    /// Canonical destination station
    pub destination: String,

    /// Profile whose plan was selected
    pub profile: Profile,

    /// Stations visited, origin first
    pub path: Vec<String>,

    /// Line changes in path order
    pub transfers: Vec<TransferResult>,

    /// Estimated travel time
    pub estimated_minutes: u32,

    /// Human-readable summary
    pub text: String,
}

impl PlanRouteResponse {
    /// Create from a domain route plan.
    pub fn from_plan(plan: &RoutePlan) -> Self {
        Self {
            origin: plan.origin.clone(),
            destination: plan.destination.clone(),
            profile: plan.profile,
            path: plan.path.clone(),
            transfers: plan.transfers.iter().map(TransferResult::from_transfer).collect(),
            estimated_minutes: plan.estimated_minutes(),
            text: plan.to_string(),
        }
    }
}

/// A line change in a planned route.
#[derive(Debug, Serialize)]
pub struct TransferResult {
    pub station: String,
    pub from_line: String,
    pub to_line: String,
}

impl TransferResult {
    /// Create from a domain transfer.
    pub fn from_transfer(transfer: &Transfer) -> Self {
        Self {
            station: transfer.station.clone(),
            from_line: transfer.from_line.clone(),
            to_line: transfer.to_line.clone(),
        }
    }
}

/// Every known station.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<String>,
}

/// Result of a forced live status refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Number of lines with a status entry
    pub lines: usize,

    /// When the snapshot in effect was fetched, if ever
    pub fetched_at: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
