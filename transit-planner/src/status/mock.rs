//! In-memory status source for running and testing without the feed.

use std::sync::Mutex;

use super::client::{LineStatusDto, StatusSource};
use super::error::StatusError;

/// Status source that serves fixed records, or fails on demand.
///
/// Counts fetches so tests can check memoization.
#[derive(Debug, Default)]
pub struct MockStatusSource {
    /// `None` simulates an unreachable feed.
    records: Mutex<Option<Vec<LineStatusDto>>>,
    fetches: Mutex<usize>,
}

impl MockStatusSource {
    /// A source that returns the given records.
    pub fn new(records: Vec<LineStatusDto>) -> Self {
        Self {
            records: Mutex::new(Some(records)),
            fetches: Mutex::new(0),
        }
    }

    /// A source that always fails.
    pub fn unreachable() -> Self {
        Self {
            records: Mutex::new(None),
            fetches: Mutex::new(0),
        }
    }

    /// Replace the records served by subsequent fetches.
    pub fn set_records(&self, records: Vec<LineStatusDto>) {
        if let Ok(mut guard) = self.records.lock() {
            *guard = Some(records);
        }
    }

    /// Make subsequent fetches fail.
    pub fn set_unreachable(&self) {
        if let Ok(mut guard) = self.records.lock() {
            *guard = None;
        }
    }

    /// Number of fetches so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().map(|n| *n).unwrap_or_default()
    }
}

impl StatusSource for MockStatusSource {
    async fn fetch(&self) -> Result<Vec<LineStatusDto>, StatusError> {
        if let Ok(mut n) = self.fetches.lock() {
            *n += 1;
        }
        let records = self
            .records
            .lock()
            .map_err(|_| StatusError::Unreachable)?
            .clone();
        records.ok_or(StatusError::Unreachable)
    }
}
