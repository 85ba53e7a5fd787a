//! Topology sources.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::Line;

use super::error::TopologyError;

/// Default dataset location, relative to the working directory.
const DEFAULT_PATH: &str = "data/data_linhas.json";

/// Top-level topology document.
///
/// Accepts both English keys and the Portuguese keys of the São Paulo
/// rail dataset.
#[derive(Debug, Deserialize)]
struct TopologyDocument {
    #[serde(alias = "linhas")]
    lines: Vec<serde_json::Value>,
}

/// A line entry as found on disk. Entries are decoded one at a time, and
/// every field is optional, so a single malformed entry is skipped instead
/// of rejecting the file.
#[derive(Debug, Deserialize)]
struct LineDto {
    #[serde(default, alias = "nome")]
    name: Option<String>,
    #[serde(default, alias = "operadora")]
    operator: Option<String>,
    #[serde(default, alias = "estacoes")]
    stations: Option<Vec<String>>,
}

/// Something that can produce the set of transit lines.
///
/// This abstraction lets the engine run against fixture topologies in
/// tests and against the on-disk dataset in production.
pub trait TopologySource: Send + Sync {
    /// Load every well-formed line.
    fn load(&self) -> Result<Vec<Line>, TopologyError>;
}

/// Topology read from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileTopology {
    path: PathBuf,
}

impl JsonFileTopology {
    /// Create a source reading from the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the dataset path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileTopology {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

impl TopologySource for JsonFileTopology {
    fn load(&self) -> Result<Vec<Line>, TopologyError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| TopologyError::Io {
            path: self.path.clone(),
            source,
        })?;

        let lines = parse_document(&contents)?;
        debug!(path = %self.path.display(), lines = lines.len(), "Loaded topology");
        Ok(lines)
    }
}

/// In-memory topology, mostly for tests and fixtures.
#[derive(Debug, Clone, Default)]
pub struct StaticTopology {
    lines: Vec<Line>,
}

impl StaticTopology {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }
}

impl TopologySource for StaticTopology {
    fn load(&self) -> Result<Vec<Line>, TopologyError> {
        Ok(self.lines.clone())
    }
}

/// Parse a topology document.
///
/// Entries missing a name or a station list are skipped with a warning.
pub fn parse_document(json: &str) -> Result<Vec<Line>, TopologyError> {
    let document: TopologyDocument =
        serde_json::from_str(json).map_err(|e| TopologyError::Malformed {
            message: e.to_string(),
        })?;

    let lines = document
        .lines
        .into_iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            let dto = match serde_json::from_value::<LineDto>(entry) {
                Ok(dto) => dto,
                Err(e) => {
                    warn!(entry = idx, error = %e, "Skipping malformed line entry");
                    return None;
                }
            };
            match (dto.name, dto.stations) {
                (Some(name), Some(stations)) => Some(Line::new(name, dto.operator, stations)),
                (name, _) => {
                    warn!(entry = idx, name = ?name, "Skipping incomplete line entry");
                    None
                }
            }
        })
        .collect();

    Ok(lines)
}

/// Every station named by any line, sorted and de-duplicated.
pub fn station_names(lines: &[Line]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| line.stations.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
