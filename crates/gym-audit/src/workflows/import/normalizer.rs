/// Canonical form of a block or question code as exported by spreadsheets:
/// byte-order marks and zero-width spaces removed, inner whitespace dropped,
/// ASCII lowercased.
pub(crate) fn normalize_code(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed: String = cleaned.split_whitespace().collect();
    collapsed.to_ascii_lowercase()
}

/// Trimmed value text, `None` when blank.
pub(crate) fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
