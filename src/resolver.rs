//! Alias resolution from user-facing tokens to provider identifiers.
//!
//! The table is static and many-to-one: several tickers and names map to the
//! same CoinGecko identifier. Resolution is total: a token the table does not
//! know is passed through unchanged and the fetch decides whether it exists.

use once_cell::sync::Lazy;

/// Supported coins: user-facing token → CoinGecko identifier.
const ALIASES: &[(&str, &str)] = &[
    ("btc", "bitcoin"),
    ("bitcoin", "bitcoin"),
    ("eth", "ethereum"),
    ("ethereum", "ethereum"),
    ("bnb", "binancecoin"),
    ("binance", "binancecoin"),
    ("xrp", "ripple"),
    ("ripple", "ripple"),
    ("ada", "cardano"),
    ("cardano", "cardano"),
    ("sol", "solana"),
    ("solana", "solana"),
    ("doge", "dogecoin"),
    ("dogecoin", "dogecoin"),
    ("dot", "polkadot"),
    ("polkadot", "polkadot"),
    ("avax", "avalanche-2"),
    ("avalanche", "avalanche-2"),
    ("ltc", "litecoin"),
    ("litecoin", "litecoin"),
];

/// Shared alias table, built once at first use.
pub fn alias_table() -> &'static AliasTable {
    static TABLE: Lazy<AliasTable> = Lazy::new(AliasTable::builtin);
    &TABLE
}

pub struct AliasTable {
    /// Entries sorted longest key first so the substring fallback is
    /// deterministic regardless of how `ALIASES` is written down.
    entries: Vec<(&'static str, &'static str)>,
}

impl AliasTable {
    fn builtin() -> Self {
        let mut entries = ALIASES.to_vec();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));
        Self { entries }
    }

    /// Whether `token` is an exact alias key.
    pub fn contains(&self, token: &str) -> bool {
        self.entries.iter().any(|(key, _)| *key == token)
    }

    /// Resolve a user token to a provider identifier.
    ///
    /// Order: exact key match, then substring fallback (token inside a key or
    /// a key inside the token, longest key wins), then the token itself.
    pub fn resolve(&self, token: &str) -> String {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            return token;
        }

        if let Some((_, id)) = self.entries.iter().find(|(key, _)| *key == token) {
            return (*id).to_string();
        }

        if let Some((_, id)) = self
            .entries
            .iter()
            .find(|(key, _)| token.contains(*key) || key.contains(token.as_str()))
        {
            return (*id).to_string();
        }

        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_aliases_resolve() {
        let table = alias_table();
        assert_eq!(table.resolve("btc"), "bitcoin");
        assert_eq!(table.resolve("bitcoin"), "bitcoin");
        assert_eq!(table.resolve("avax"), "avalanche-2");
        assert_eq!(table.resolve("xrp"), "ripple");
    }

    #[test]
    fn resolution_is_case_insensitive() {
        let table = alias_table();
        for &(key, _) in ALIASES {
            assert_eq!(table.resolve(key), table.resolve(&key.to_uppercase()));
        }
    }

    #[test]
    fn synonyms_share_an_identifier() {
        let table = alias_table();
        assert_eq!(table.resolve("btc"), table.resolve("bitcoin"));
        assert_eq!(table.resolve("eth"), table.resolve("ethereum"));
        assert_eq!(table.resolve("avalanche"), table.resolve("avax"));
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let table = alias_table();
        assert_eq!(table.resolve("not-a-coin"), "not-a-coin");
        assert_eq!(table.resolve("  PEPE "), "pepe");
    }

    #[test]
    fn resolution_is_total_for_non_empty_input() {
        let table = alias_table();
        for token in ["z", "zz", "monero", "shiba-inu"] {
            assert!(!table.resolve(token).is_empty());
        }
    }

    #[test]
    fn substring_fallback_prefers_longest_key() {
        let table = alias_table();
        assert_eq!(table.resolve("bitco"), "bitcoin");
        assert_eq!(table.resolve("ethereum classic"), "ethereum");
    }
}
