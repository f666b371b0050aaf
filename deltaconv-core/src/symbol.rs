//! Split concatenated market strings (`ETHBTC`) into base and quote currency.

use serde::{Deserialize, Serialize};

use crate::currency::{CurrencyCatalog, CurrencySymbol};
use crate::error::{ConvertError, Result};

/// Base and quote currency of a market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingPair {
    pub base: CurrencySymbol,
    pub quote: CurrencySymbol,
}

/// Resolves market strings against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct SymbolDecomposer<'a> {
    catalog: &'a CurrencyCatalog,
}

impl<'a> SymbolDecomposer<'a> {
    pub fn new(catalog: &'a CurrencyCatalog) -> Self {
        Self { catalog }
    }

    /// Find the first catalog symbol whose removal from `market` leaves
    /// another known symbol.
    ///
    /// Only the first occurrence is removed. The removed symbol must sit at
    /// the start (it is the base) or at the end (it is the quote) of the
    /// market; a symbol found only in the interior does not count and the
    /// scan moves on. `BTCBTC` splits into `(BTC, BTC)`; rejecting such a
    /// pair is left to [`Transaction::new`](crate::Transaction::new).
    ///
    /// Returns `None` when no symbol yields a split.
    pub fn decompose(&self, market: &str) -> Option<TradingPair> {
        for candidate in self.catalog.all() {
            let text = candidate.as_str();
            let rest = market.replacen(text, "", 1);
            let Some(other) = self.catalog.find(&rest) else {
                continue;
            };

            let pair = if market.starts_with(text) {
                TradingPair {
                    base: candidate.clone(),
                    quote: other.clone(),
                }
            } else if market.ends_with(text) {
                TradingPair {
                    base: other.clone(),
                    quote: candidate.clone(),
                }
            } else {
                tracing::trace!(market, symbol = text, "symbol only found inside market");
                continue;
            };

            tracing::trace!(market, base = %pair.base, quote = %pair.quote, "market resolved");
            return Some(pair);
        }
        None
    }

    /// Like [`decompose`](Self::decompose), but an unresolved market is an error.
    pub fn resolve(&self, market: &str) -> Result<TradingPair> {
        self.decompose(market)
            .ok_or_else(|| ConvertError::UnresolvedSymbol {
                market: market.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(base: &str, quote: &str) -> TradingPair {
        TradingPair {
            base: base.into(),
            quote: quote.into(),
        }
    }

    #[test]
    fn test_quote_at_end() {
        let catalog = CurrencyCatalog::new(["BTC", "ETH"]).unwrap();
        let decomposer = SymbolDecomposer::new(&catalog);
        assert_eq!(decomposer.decompose("ETHBTC"), Some(pair("ETH", "BTC")));
    }

    #[test]
    fn test_base_at_start() {
        let catalog = CurrencyCatalog::new(["BTC", "USDT"]).unwrap();
        let decomposer = SymbolDecomposer::new(&catalog);
        assert_eq!(decomposer.decompose("BTCUSDT"), Some(pair("BTC", "USDT")));
    }

    #[test]
    fn test_unknown_market_is_unresolved() {
        let catalog = CurrencyCatalog::new(["BTC", "ETH"]).unwrap();
        let decomposer = SymbolDecomposer::new(&catalog);
        assert_eq!(decomposer.decompose("XRPUSDT"), None);
        assert_eq!(decomposer.decompose("ETHUSDT"), None);
        assert_eq!(
            decomposer.resolve("XRPUSDT").unwrap_err(),
            ConvertError::UnresolvedSymbol { market: "XRPUSDT".into() }
        );
    }

    #[test]
    fn test_interior_match_is_rejected() {
        // Removing "BC" from "ABCD" leaves "AD", but "BC" is neither prefix
        // nor suffix, so no pair is produced.
        let catalog = CurrencyCatalog::new(["BC", "AD"]).unwrap();
        let decomposer = SymbolDecomposer::new(&catalog);
        assert_eq!(decomposer.decompose("ABCD"), None);
    }

    #[test]
    fn test_interior_match_falls_through_to_later_symbol() {
        let catalog = CurrencyCatalog::new(["BC", "AD", "ABC", "D"]).unwrap();
        let decomposer = SymbolDecomposer::new(&catalog);
        assert_eq!(decomposer.decompose("ABCD"), Some(pair("ABC", "D")));
    }

    #[test]
    fn test_catalog_order_breaks_ties() {
        // Both BNB+ETH and BNBE+TH are valid splits; the first listed wins.
        let quotes_first = CurrencyCatalog::new(["ETH", "BNB", "BNBE", "TH"]).unwrap();
        let odd_first = CurrencyCatalog::new(["BNBE", "TH", "ETH", "BNB"]).unwrap();
        assert_eq!(
            SymbolDecomposer::new(&quotes_first).decompose("BNBETH"),
            Some(pair("BNB", "ETH"))
        );
        assert_eq!(
            SymbolDecomposer::new(&odd_first).decompose("BNBETH"),
            Some(pair("BNBE", "TH"))
        );
    }

    #[test]
    fn test_is_deterministic() {
        let catalog = CurrencyCatalog::builtin();
        let decomposer = SymbolDecomposer::new(&catalog);
        let first = decomposer.decompose("IOTAETH");
        for _ in 0..10 {
            assert_eq!(decomposer.decompose("IOTAETH"), first);
        }
        assert_eq!(first, Some(pair("IOTA", "ETH")));
    }

    #[test]
    fn test_same_currency_twice_splits_into_itself() {
        // The first listed symbol wins even though a later one gives a
        // pair of two distinct currencies.
        let catalog = CurrencyCatalog::new(["BTC", "BTCB", "TC"]).unwrap();
        let decomposer = SymbolDecomposer::new(&catalog);
        assert_eq!(decomposer.decompose("BTCBTC"), Some(pair("BTC", "BTC")));
    }

    #[test]
    fn test_builtin_catalog_markets() {
        let catalog = CurrencyCatalog::builtin();
        let decomposer = SymbolDecomposer::new(&catalog);
        assert_eq!(decomposer.decompose("BNBETH"), Some(pair("BNB", "ETH")));
        assert_eq!(decomposer.decompose("ETCETH"), Some(pair("ETC", "ETH")));
        assert_eq!(decomposer.decompose("TUSDBTC"), Some(pair("TUSD", "BTC")));
        assert_eq!(decomposer.decompose("NEOUSDT"), Some(pair("NEO", "USDT")));
    }
}
