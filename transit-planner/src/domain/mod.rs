//! Domain types for the transit route planner.
//!
//! Lines as loaded from the topology, the name normalization shared by
//! the resolver and the live status overlay, and the route plan values
//! handed back to callers.

mod line;
mod plan;
mod station;

pub use line::Line;
pub use plan::{Profile, RoutePlan, Transfer};
pub use station::normalize_name;
