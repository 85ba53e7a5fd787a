//! Multi-profile transit route planner.
//!
//! A routing engine that answers: "what is the best way from this station
//! to that one, right now?" Station names are resolved fuzzily, the network
//! is priced under several riding profiles with live disruption data
//! blended in, and the cheapest plan wins.

pub mod cache;
pub mod domain;
pub mod engine;
pub mod graph;
pub mod planner;
pub mod resolver;
pub mod status;
pub mod topology;
pub mod web;
