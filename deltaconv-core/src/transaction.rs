//! Normalized trade model shared by every source format and exporter.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::currency::CurrencySymbol;
use crate::error::{ConvertError, Result};

/// A quantity of one currency. Negative amounts are outflows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub amount: Decimal,
    pub currency: CurrencySymbol,
}

impl Position {
    pub fn new(amount: Decimal, currency: impl Into<CurrencySymbol>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

/// Fee charged on a trade. The currency is blank when nothing was charged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Fee {
    pub amount: Decimal,
    pub currency: CurrencySymbol,
}

impl Fee {
    pub fn new(amount: Decimal, currency: impl Into<CurrencySymbol>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeType {
    Buy,
    Sell,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Buy => "BUY",
            TradeType::Sell => "SELL",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeType {
    type Err = String;

    /// Exchanges disagree on casing (`Buy`, `BUY`, `buy`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(TradeType::Buy),
            "SELL" => Ok(TradeType::Sell),
            _ => Err(format!("expected BUY or SELL, got '{}'", s.trim())),
        }
    }
}

/// One normalized trade.
///
/// The trading pair is held as (quote side, base side). Both sides always
/// refer to different currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub timestamp: NaiveDateTime,
    quote: Position,
    base: Position,
    pub trade_type: TradeType,
    pub price: Decimal,
    pub fee: Fee,
    pub exchange: String,
}

impl Transaction {
    pub fn new(
        timestamp: NaiveDateTime,
        trading_pair: (Position, Position),
        trade_type: TradeType,
        price: Decimal,
        fee: Fee,
        exchange: impl Into<String>,
    ) -> Result<Self> {
        let (quote, base) = trading_pair;
        if quote.currency == base.currency {
            return Err(ConvertError::SameCurrencyPair {
                currency: quote.currency.to_string(),
            });
        }
        Ok(Self {
            timestamp,
            quote,
            base,
            trade_type,
            price,
            fee,
            exchange: exchange.into(),
        })
    }

    /// (quote side, base side)
    pub fn trading_pair(&self) -> (&Position, &Position) {
        (&self.quote, &self.base)
    }

    pub fn quote(&self) -> &Position {
        &self.quote
    }

    pub fn base(&self) -> &Position {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_trade_type_parsing() {
        assert_eq!("Buy".parse::<TradeType>(), Ok(TradeType::Buy));
        assert_eq!(" SELL ".parse::<TradeType>(), Ok(TradeType::Sell));
        assert_eq!("sell".parse::<TradeType>(), Ok(TradeType::Sell));
        assert!("HOLD".parse::<TradeType>().is_err());
        assert_eq!(TradeType::Buy.to_string(), "BUY");
    }

    #[test]
    fn test_rejects_same_currency_pair() {
        let err = Transaction::new(
            ts(),
            (
                Position::new(Decimal::ONE, "BTC"),
                Position::new(Decimal::ONE, "BTC"),
            ),
            TradeType::Buy,
            Decimal::ONE,
            Fee::default(),
            "Binance",
        )
        .unwrap_err();
        assert_eq!(err, ConvertError::SameCurrencyPair { currency: "BTC".into() });
    }

    #[test]
    fn test_serializes_with_string_decimals() {
        let t = Transaction::new(
            ts(),
            (
                Position::new(Decimal::new(5, 2), "BTC"),
                Position::new(Decimal::new(10, 1), "ETH"),
            ),
            TradeType::Sell,
            Decimal::new(5, 2),
            Fee::new(Decimal::ZERO, ""),
            "Binance",
        )
        .unwrap();
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["quote"]["amount"], "0.05");
        assert_eq!(json["base"]["currency"], "ETH");
        assert_eq!(json["trade_type"], "SELL");
        assert_eq!(t.trading_pair().0.currency.as_str(), "BTC");
    }
}
