// crates/tailorfind-core/src/text.rs

/// Convert a string into the key used for name comparison and ordering.
///
/// Plain Unicode lowercasing: no transliteration, no character removal, so a
/// key only ever contains what the input contained.
///
/// # Examples
///
/// ```rust
/// use tailorfind_core::text::fold_key;
///
/// assert_eq!(fold_key("ACE Tailors"), "ace tailors");
/// assert_eq!(fold_key("CAFÉ"), "café");
/// ```
pub fn fold_key(s: &str) -> String {
    s.to_lowercase()
}

/// Normalize raw query input: trim surrounding whitespace, then fold.
///
/// A whitespace-only query normalizes to the empty string, which matches
/// every record.
pub fn normalize_query(q: &str) -> String {
    fold_key(q.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_only() {
        assert_eq!(fold_key("Müller Schneiderei"), "müller schneiderei");
        assert_eq!(fold_key("ÉMILE"), "émile");
        assert_ne!(fold_key("Café"), fold_key("Cafe"));
    }

    #[test]
    fn normalize_trims_whitespace() {
        assert_eq!(normalize_query("  Ace  "), "ace");
        assert_eq!(normalize_query("   \t"), "");
    }

    #[test]
    fn symbols_and_scripts_are_kept() {
        assert_eq!(fold_key("😀 Tailors"), "😀 tailors");
        assert_eq!(fold_key("北京 Tailors"), "北京 tailors");
        assert_eq!(normalize_query("\u{200b}"), "\u{200b}");
    }
}
