//! Web layer for the route planner.
//!
//! Exposes route planning and station listing as HTTP/JSON endpoints for
//! the conversation layer.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, LiveEngine};
