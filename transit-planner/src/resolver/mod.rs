//! Station name resolution.
//!
//! Maps noisy, user-supplied station names to canonical graph nodes:
//! 1. normalize the input (strip diacritics, case-fold)
//! 2. exact lookup in the normalized → canonical map
//! 3. otherwise, the single most similar normalized name, if its
//!    similarity reaches the threshold
//!
//! There is no multi-candidate disambiguation: callers get one best guess
//! or nothing.

mod similarity;

use std::collections::HashMap;

use tracing::debug;

use crate::domain::normalize_name;

pub use similarity::similarity;

/// Minimum similarity for an approximate match.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.8;

/// How an input was matched to a station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchConfidence {
    /// The normalized input equals a normalized station name.
    Exact,
    /// The closest station name, with its similarity score.
    Approximate(f64),
}

/// A successful resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'a> {
    /// Canonical station name.
    pub station: &'a str,
    pub confidence: MatchConfidence,
}

/// Resolves free-text station names against a fixed station set.
#[derive(Debug, Clone)]
pub struct StationResolver {
    /// Normalized name → canonical name.
    canonical: HashMap<String, String>,
    /// Normalized names in sorted order, for deterministic scanning.
    keys: Vec<String>,
    threshold: f64,
}

impl StationResolver {
    /// Create a resolver over the given canonical station names.
    ///
    /// If two stations normalize to the same key, the later one wins.
    pub fn new<I, S>(stations: I, threshold: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut canonical = HashMap::new();
        for station in stations {
            let station = station.as_ref();
            canonical.insert(normalize_name(station), station.to_string());
        }

        let mut keys: Vec<String> = canonical.keys().cloned().collect();
        keys.sort();

        Self {
            canonical,
            keys,
            threshold,
        }
    }

    /// Resolve a raw name to a canonical station name.
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        self.resolve_match(raw).map(|r| r.station)
    }

    /// Resolve a raw name, reporting how it matched.
    pub fn resolve_match(&self, raw: &str) -> Option<Resolved<'_>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let normalized = normalize_name(raw);
        if let Some(station) = self.canonical.get(&normalized) {
            return Some(Resolved {
                station,
                confidence: MatchConfidence::Exact,
            });
        }

        let (key, score) = self.closest(&normalized)?;
        if score < self.threshold {
            debug!(input = raw, closest = %key, score, "No station close enough");
            return None;
        }

        let station = self.canonical.get(key)?;
        debug!(input = raw, station = %station, score, "Approximate station match");
        Some(Resolved {
            station,
            confidence: MatchConfidence::Approximate(score),
        })
    }

    /// Most similar normalized key. Ties go to the greatest key in sorted
    /// order.
    fn closest(&self, normalized: &str) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for key in &self.keys {
            let score = similarity(normalized, key);
            if best.is_none_or(|(_, s)| score >= s) {
                best = Some((key.as_str(), score));
            }
        }
        best
    }

    /// Number of distinct normalized station names.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every station resolves to itself, however it is cased
        #[test]
        fn stations_resolve_to_themselves(
            names in proptest::collection::btree_set("[A-Za-z][a-z]{2,12}", 1..12)
        ) {
            let resolver = StationResolver::new(&names, DEFAULT_MATCH_THRESHOLD);
            for name in &names {
                let resolved = resolver.resolve_match(&name.to_uppercase());
                prop_assert!(resolved.is_some());
                let resolved = resolved.unwrap();
                prop_assert_eq!(resolved.confidence, MatchConfidence::Exact);
                prop_assert_eq!(normalize_name(resolved.station), normalize_name(name));
            }
        }
    }
}
