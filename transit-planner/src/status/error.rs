//! Live status feed error types.

/// Errors that can occur when fetching the live status feed.
///
/// These never cross the engine boundary: the overlay logs them and falls
/// back to the previous snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Feed could not be reached at all
    #[error("status feed unreachable")]
    Unreachable,
}
