//! Cost configuration for route search.

/// Degradation keywords matched against a line's live situation,
/// case-insensitively, as substrings.
const DEFAULT_DISRUPTION_KEYWORDS: [&str; 6] = [
    "reduzida",
    "falha",
    "interrup",
    "reduced",
    "failure",
    "interrupt",
];

/// Edge cost parameters, in abstract time units (roughly minutes).
#[derive(Debug, Clone)]
pub struct CostConfig {
    /// Travel time of every edge before penalties.
    pub base_travel_time: u32,

    /// Added to every edge of a line whose situation matches a keyword.
    pub disruption_penalty: u32,

    /// Added by the transfer-averse profile to edges touching a transfer
    /// station.
    pub transfer_penalty: u32,

    /// Added by the accessible profile to every edge.
    pub accessibility_penalty: u32,

    /// Lowercase substrings that mark a line as degraded.
    pub disruption_keywords: Vec<String>,
}

impl CostConfig {
    /// Create a new configuration with the given penalties and the default
    /// keyword set.
    pub fn new(
        base_travel_time: u32,
        disruption_penalty: u32,
        transfer_penalty: u32,
        accessibility_penalty: u32,
    ) -> Self {
        Self {
            base_travel_time,
            disruption_penalty,
            transfer_penalty,
            accessibility_penalty,
            disruption_keywords: DEFAULT_DISRUPTION_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }

    /// Replace the disruption keywords. Keywords are lowercased.
    pub fn with_keywords(mut self, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.disruption_keywords = keywords
            .into_iter()
            .map(|k| k.into().to_lowercase())
            .collect();
        self
    }

    /// Whether a situation string reports degraded service.
    pub fn is_degraded(&self, situation: &str) -> bool {
        let situation = situation.to_lowercase();
        self.disruption_keywords
            .iter()
            .any(|k| situation.contains(k.as_str()))
    }
}

impl Default for CostConfig {
    fn default() -> Self {
        Self::new(3, 10, 3, 2)
    }
}
