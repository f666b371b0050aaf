//! Currency symbols and the catalog of known symbols.
//!
//! The catalog keeps its symbols in insertion order. Symbol decomposition
//! walks the catalog front to back and keeps the first match, so the order
//! of the catalog source is the tie-break rule.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{ConvertError, Result};

const BUILTIN_CATALOG: &str = include_str!("../data/currencies.txt");

static SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("literal pattern"));

/// A currency ticker such as `BTC`. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct CurrencySymbol(String);

impl CurrencySymbol {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fee currencies may be blank when no fee was charged.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CurrencySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CurrencySymbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CurrencySymbol {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Ordered set of known currency symbols.
#[derive(Debug, Clone, Default)]
pub struct CurrencyCatalog {
    symbols: Vec<CurrencySymbol>,
    index: HashMap<String, usize>,
}

impl CurrencyCatalog {
    /// Build a catalog from symbols in the given order.
    ///
    /// Fails on blank or non-alphanumeric symbols and on duplicates.
    pub fn new<I, S>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::default();
        for symbol in symbols {
            let symbol = symbol.into();
            if !SYMBOL_RE.is_match(&symbol) {
                return Err(ConvertError::InvalidSymbol { symbol });
            }
            if catalog.index.contains_key(&symbol) {
                return Err(ConvertError::DuplicateSymbol { symbol });
            }
            catalog.push(symbol);
        }
        Ok(catalog)
    }

    /// Parse a catalog listing: one symbol per line, blank lines and `#`
    /// comments ignored, surrounding whitespace trimmed.
    pub fn parse(text: &str) -> Result<Self> {
        Self::new(listing_lines(text))
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        for symbol in listing_lines(BUILTIN_CATALOG) {
            if !catalog.index.contains_key(symbol) {
                catalog.push(symbol.to_string());
            }
        }
        catalog
    }

    fn push(&mut self, symbol: String) {
        self.index.insert(symbol.clone(), self.symbols.len());
        self.symbols.push(CurrencySymbol(symbol));
    }

    /// Every known symbol in catalog order. Each call starts a fresh pass.
    pub fn all(&self) -> std::slice::Iter<'_, CurrencySymbol> {
        self.symbols.iter()
    }

    /// Exact, case-sensitive lookup. A miss is a normal outcome.
    pub fn find(&self, text: &str) -> Option<&CurrencySymbol> {
        self.index.get(text).map(|&i| &self.symbols[i])
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<'a> IntoIterator for &'a CurrencyCatalog {
    type Item = &'a CurrencySymbol;
    type IntoIter = std::slice::Iter<'a, CurrencySymbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.all()
    }
}

fn listing_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_no_duplicates() {
        let listed: Vec<_> = listing_lines(BUILTIN_CATALOG).collect();
        let catalog = CurrencyCatalog::new(listed.iter().copied()).unwrap();
        assert_eq!(catalog.len(), listed.len());
        assert_eq!(CurrencyCatalog::builtin().len(), listed.len());
    }

    #[test]
    fn test_find_is_exact_and_case_sensitive() {
        let catalog = CurrencyCatalog::new(["BTC", "ETH"]).unwrap();
        assert_eq!(catalog.find("BTC").map(|s| s.as_str()), Some("BTC"));
        assert!(catalog.find("btc").is_none());
        assert!(catalog.find("BT").is_none());
        assert!(catalog.find("").is_none());
    }

    #[test]
    fn test_all_keeps_insertion_order_and_restarts() {
        let catalog = CurrencyCatalog::new(["ETH", "BTC", "IOTA"]).unwrap();
        let first: Vec<_> = catalog.all().map(|s| s.as_str()).collect();
        let second: Vec<_> = catalog.all().map(|s| s.as_str()).collect();
        assert_eq!(first, vec!["ETH", "BTC", "IOTA"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_listing() {
        let catalog = CurrencyCatalog::parse("# quotes\nBTC\n\n  ETH  \nNEO\n").unwrap();
        let symbols: Vec<_> = catalog.into_iter().map(|s| s.to_string()).collect();
        assert_eq!(symbols, vec!["BTC", "ETH", "NEO"]);
    }

    #[test]
    fn test_rejects_duplicates_and_bad_symbols() {
        assert_eq!(
            CurrencyCatalog::new(["BTC", "ETH", "BTC"]).unwrap_err(),
            ConvertError::DuplicateSymbol { symbol: "BTC".into() }
        );
        assert_eq!(
            CurrencyCatalog::new(["BTC", "ET H"]).unwrap_err(),
            ConvertError::InvalidSymbol { symbol: "ET H".into() }
        );
    }
}
