//! Heuristics deciding whether free-form chat text looks like an asset query.
//!
//! Ordinary conversation must not trigger market fetches, while ticker-like
//! tokens ("btc", "shiba-inu") should. The filter is deliberately permissive.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::resolver::AliasTable;

static STRIP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.-]").expect("valid strip pattern"));

static TICKER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9-]*$").expect("valid ticker pattern"));

/// Strip everything but word characters, whitespace, hyphen and period,
/// then trim and lowercase.
pub fn clean_input(text: &str) -> String {
    STRIP_PATTERN.replace_all(text, "").trim().to_lowercase()
}

/// Whether free text is worth resolving into a price lookup.
///
/// Accepts known alias keys unconditionally; otherwise the cleaned text must
/// be at least two characters and shaped like a ticker (letter first, then
/// letters, digits or hyphens).
pub fn is_plausible_query(text: &str, aliases: &AliasTable) -> bool {
    let cleaned = clean_input(text);

    if cleaned.chars().count() < 2 {
        return false;
    }

    if aliases.contains(&cleaned) {
        return true;
    }

    TICKER_PATTERN.is_match(&cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::alias_table;

    #[test]
    fn known_alias_is_accepted() {
        assert!(is_plausible_query("btc", alias_table()));
        assert!(is_plausible_query("dogecoin", alias_table()));
    }

    #[test]
    fn ticker_shaped_tokens_are_accepted() {
        assert!(is_plausible_query("monero", alias_table()));
        assert!(is_plausible_query("shiba-inu", alias_table()));
    }

    #[test]
    fn leading_digit_is_rejected() {
        assert!(!is_plausible_query("123abc", alias_table()));
    }

    #[test]
    fn short_input_is_rejected() {
        assert!(!is_plausible_query("a", alias_table()));
        assert!(!is_plausible_query("", alias_table()));
    }

    #[test]
    fn conversational_text_is_rejected() {
        assert!(!is_plausible_query("hello world", alias_table()));
        assert!(!is_plausible_query("nasılsın?", alias_table()));
    }

    #[test]
    fn punctuation_is_stripped_before_matching() {
        assert_eq!(clean_input("  Bitcoin!!  "), "bitcoin");
        assert!(is_plausible_query("Bitcoin!!", alias_table()));
    }
}
