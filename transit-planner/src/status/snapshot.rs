//! Live status snapshot.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::normalize_name;

/// Per-line service situation at a point in time.
///
/// Keys are normalized line names. An empty snapshot is valid and means
/// "no known disruptions".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveStatus {
    lines: HashMap<String, String>,
    fetched_at: Option<DateTime<Utc>>,
}

impl LiveStatus {
    /// Snapshot with no data.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from `(line name, situation)` pairs.
    ///
    /// Names are normalized and situations trimmed. Records with a blank
    /// name are dropped.
    pub fn from_records<I, N, S>(records: I, fetched_at: Option<DateTime<Utc>>) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: AsRef<str>,
        S: AsRef<str>,
    {
        let lines = records
            .into_iter()
            .filter_map(|(name, situation)| {
                let key = normalize_name(name.as_ref().trim());
                if key.is_empty() {
                    return None;
                }
                Some((key, situation.as_ref().trim().to_string()))
            })
            .collect();

        Self { lines, fetched_at }
    }

    /// Situation reported for a line, looked up by normalized name.
    pub fn situation(&self, line: &str) -> Option<&str> {
        self.lines
            .get(&normalize_name(line.trim()))
            .map(String::as_str)
    }

    /// When the snapshot was fetched, if it came from the feed.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Number of lines with a reported situation.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_normalized() {
        let status = LiveStatus::from_records([("Linha 1 - Azul", " Operação Normal ")], None);
        assert_eq!(status.situation("LINHA 1 - AZUL"), Some("Operação Normal"));
        assert_eq!(status.situation("linha 1 - azul"), Some("Operação Normal"));
        assert_eq!(status.situation("Linha 2 - Verde"), None);
    }

    #[test]
    fn blank_names_are_dropped() {
        let status = LiveStatus::from_records([("", "Falha"), ("  ", "Falha"), ("L1", "ok")], None);
        assert_eq!(status.len(), 1);
    }

    #[test]
    fn empty_snapshot() {
        let status = LiveStatus::empty();
        assert!(status.is_empty());
        assert_eq!(status.fetched_at(), None);
        assert_eq!(status.situation("L1"), None);
    }

    #[test]
    fn keeps_fetch_time() {
        let now = Utc::now();
        let status = LiveStatus::from_records([("L1", "ok")], Some(now));
        assert_eq!(status.fetched_at(), Some(now));
    }
}
