/// Sentinel inserted into edited page text to mark where a new section starts
pub const SECTION_BREAK: &str = "<<<SECTION_BREAK>>>";

/// Split flattened text on every literal occurrence of `marker`
///
/// Each piece is trimmed of surrounding whitespace and pieces keep their
/// original order. Empty input yields a single empty piece.
pub fn split_on_marker(text: &str, marker: &str) -> Vec<String> {
    // str::split on an empty pattern matches between every char
    if marker.is_empty() {
        return vec![text.trim().to_string()];
    }

    text.split(marker)
        .map(|piece| piece.trim().to_string())
        .collect()
}
