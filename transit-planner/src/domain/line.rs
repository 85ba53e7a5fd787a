//! Transit line type.

/// A transit line: a named, operated, ordered sequence of stations.
///
/// Lines are the source of truth for the station graph. They are
/// immutable once loaded; consecutive stations in `stations` are
/// directly connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Display name of the line (e.g. "Linha 1 - Azul").
    pub name: String,

    /// Operating company, if known.
    pub operator: Option<String>,

    /// Stations served, in running order.
    pub stations: Vec<String>,
}

impl Line {
    /// Create a new line.
    pub fn new(
        name: impl Into<String>,
        operator: Option<String>,
        stations: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            operator,
            stations: stations.into_iter().map(Into::into).collect(),
        }
    }

    /// Consecutive station pairs along the line.
    pub fn segments(&self) -> impl Iterator<Item = (&str, &str)> {
        self.stations
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_pairs_consecutive_stations() {
        let line = Line::new("L1", None, ["A", "B", "C"]);
        let segments: Vec<_> = line.segments().collect();
        assert_eq!(segments, vec![("A", "B"), ("B", "C")]);
    }

    #[test]
    fn single_station_line_has_no_segments() {
        let line = Line::new("Shuttle", Some("Op".to_string()), ["A"]);
        assert_eq!(line.segments().count(), 0);
        assert_eq!(line.stations, vec!["A"]);
    }
}
