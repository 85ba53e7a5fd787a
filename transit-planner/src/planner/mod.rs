//! Multi-profile route planner.
//!
//! This module answers: "what is the best way from station A to station B
//! right now?" Each riding profile prices the same graph differently
//! (disruption-aware, transfer-averse, accessible), a shortest path is
//! computed per profile, and the cheapest plan wins.

mod config;
mod format;
mod profile;
mod rank;
mod search;

#[cfg(test)]
mod search_tests;

pub use config::CostConfig;
pub use format::render;
pub use profile::{Algorithm, disruption_penalty};
pub use rank::arbitrate;
pub use search::{Planner, RouteSearch, SearchError, hop_distances};
