//! Live line status feed and overlay.
//!
//! The feed reports a free-text situation per line ("Operação Normal",
//! "Velocidade Reduzida", ...). It is best-effort: the overlay memoizes
//! the last good snapshot and degrades to an empty one, so routing never
//! fails because of it.

mod client;
mod error;
mod mock;
mod overlay;
mod snapshot;

pub use client::{LineStatusDto, StatusClient, StatusClientConfig, StatusSource};
pub use error::StatusError;
pub use mock::MockStatusSource;
pub use overlay::{LiveStatusOverlay, OverlayConfig};
pub use snapshot::LiveStatus;
