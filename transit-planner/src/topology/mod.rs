//! Static line/station dataset loading.
//!
//! The topology is a structured document listing each line with its
//! operator and ordered stations. It is read once and then memoized by the
//! network cache; there is no hot reload.

mod error;
mod source;

pub use error::TopologyError;
pub use source::{JsonFileTopology, StaticTopology, TopologySource, parse_document, station_names};
