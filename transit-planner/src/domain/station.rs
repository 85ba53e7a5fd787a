//! Station name normalization.

use unicode_normalization::UnicodeNormalization;

/// Normalize a station or line name for comparison.
///
/// Applies compatibility decomposition (NFKD), drops every character that
/// is not ASCII (which removes combining diacritics) and lowercases the
/// result. Display strings are never replaced by their normalized form;
/// this is only used as a lookup key.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::normalize_name;
///
/// assert_eq!(normalize_name("Sé"), "se");
/// assert_eq!(normalize_name("CONSOLAÇÃO"), "consolacao");
/// assert_eq!(normalize_name("Linha 4-Amarela"), "linha 4-amarela");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .to_lowercase()
}
