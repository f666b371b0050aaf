//! Binance "Trade History" export.
//!
//! Header:
//!   Date(UTC),Market,Type,Price,Amount,Total,Fee,Fee Coin
//!   2018-01-01 00:00,ETHBTC,BUY,0.05,1.0,0.05,0.0005,ETH
//!
//! `Amount` is in the base currency, `Total` in the quote currency.

use chrono::NaiveDateTime;
use deltaconv_core::{Cell, Column, Result};

use super::{SourceParser, TradeFields, decode_date_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeColumn {
    Date,
    Market,
    Type,
    Price,
    Amount,
    Total,
    Fee,
    FeeCoin,
}

impl Column for TradeColumn {
    const ALL: &'static [Self] = &[
        TradeColumn::Date,
        TradeColumn::Market,
        TradeColumn::Type,
        TradeColumn::Price,
        TradeColumn::Amount,
        TradeColumn::Total,
        TradeColumn::Fee,
        TradeColumn::FeeCoin,
    ];

    fn name(self) -> &'static str {
        match self {
            TradeColumn::Date => "Date(UTC)",
            TradeColumn::Market => "Market",
            TradeColumn::Type => "Type",
            TradeColumn::Price => "Price",
            TradeColumn::Amount => "Amount",
            TradeColumn::Total => "Total",
            TradeColumn::Fee => "Fee",
            TradeColumn::FeeCoin => "Fee Coin",
        }
    }
}

pub struct BinanceTradeParser;

impl SourceParser for BinanceTradeParser {
    type Column = TradeColumn;

    const EXCHANGE: &'static str = "Binance";

    const FIELDS: TradeFields<TradeColumn> = TradeFields {
        timestamp: TradeColumn::Date,
        market: TradeColumn::Market,
        trade_type: TradeColumn::Type,
        price: TradeColumn::Price,
        base_amount: TradeColumn::Amount,
        quote_amount: TradeColumn::Total,
        fee: TradeColumn::Fee,
        fee_currency: TradeColumn::FeeCoin,
    };

    fn decode_timestamp(&self, cell: &Cell) -> Result<NaiveDateTime> {
        decode_date_text(cell, TradeColumn::Date.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use deltaconv_core::{ConvertError, CurrencyCatalog, Position, Table, TradeType};
    use rust_decimal::Decimal;

    fn header() -> Vec<Cell> {
        TradeColumn::ALL.iter().map(|c| Cell::text(c.name())).collect()
    }

    fn row(values: [&str; 8]) -> Vec<Cell> {
        values.into_iter().map(Cell::text).collect()
    }

    fn catalog() -> CurrencyCatalog {
        CurrencyCatalog::new(["BTC", "ETH", "USDT", "IOTA"]).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parses_basic_row() {
        let table = Table::new(vec![
            header(),
            row(["2018-01-01 00:00", "ETHBTC", "BUY", "0.05", "1.0", "0.05", "0.0005", "ETH"]),
        ]);

        let txns = BinanceTradeParser.parse(table, &catalog()).unwrap();
        assert_eq!(txns.len(), 1);

        let t = &txns[0];
        assert_eq!(t.timestamp, at(2018, 1, 1, 0, 0));
        let (quote, base) = t.trading_pair();
        assert_eq!(quote, &Position::new(Decimal::new(5, 2), "BTC"));
        assert_eq!(base, &Position::new(Decimal::new(10, 1), "ETH"));
        assert_eq!(t.trade_type, TradeType::Buy);
        assert_eq!(t.price, Decimal::new(5, 2));
        assert_eq!(t.fee.amount, Decimal::new(5, 4));
        assert_eq!(t.fee.currency.as_str(), "ETH");
        assert_eq!(t.exchange, "Binance");
    }

    #[test]
    fn test_keeps_input_order() {
        let table = Table::new(vec![
            header(),
            row(["2018-01-02 10:00:00", "BTCUSDT", "SELL", "13000", "0.1", "1300", "1.3", "USDT"]),
            row(["2018-01-01 09:00:00", "IOTAETH", "Buy", "0.003", "100", "0.3", "0.1", "IOTA"]),
        ]);

        let txns = BinanceTradeParser.parse(table, &catalog()).unwrap();
        assert_eq!(txns[0].base().currency.as_str(), "BTC");
        assert_eq!(txns[0].trade_type, TradeType::Sell);
        assert_eq!(txns[1].base().currency.as_str(), "IOTA");
        assert_eq!(txns[1].quote().currency.as_str(), "ETH");
    }

    #[test]
    fn test_column_order_is_free() {
        let table = Table::new(vec![
            row(["Market", "Fee Coin", "Type", "Date(UTC)", "Total", "Amount", "Fee", "Price"]),
            row(["ETHBTC", "ETH", "SELL", "2018-01-01 00:00", "0.05", "1.0", "0", "0.05"]),
        ]);
        let txns = BinanceTradeParser.parse(table, &catalog()).unwrap();
        assert_eq!(txns[0].quote().amount, Decimal::new(5, 2));
        assert_eq!(txns[0].base().amount, Decimal::ONE);
    }

    #[test]
    fn test_legacy_and_typed_dates() {
        let parser = BinanceTradeParser;
        assert_eq!(
            parser.decode_timestamp(&Cell::text("31.12.17 23:59")).unwrap(),
            at(2017, 12, 31, 23, 59)
        );
        let typed = at(2018, 3, 4, 5, 6);
        assert_eq!(parser.decode_timestamp(&Cell::DateTime(typed)).unwrap(), typed);
        assert_eq!(
            parser.decode_timestamp(&Cell::text("yesterday")).unwrap_err(),
            ConvertError::MalformedTimestamp {
                column: "Date(UTC)".into(),
                value: "yesterday".into(),
            }
        );
    }

    #[test]
    fn test_schema_drift_is_fatal() {
        let mut cols = header();
        cols.push(Cell::text("Realized Profit"));
        let table = Table::new(vec![cols]);
        assert_eq!(
            BinanceTradeParser.parse(table, &catalog()).unwrap_err(),
            ConvertError::SchemaDrift { column: "Realized Profit".into() }
        );
    }

    #[test]
    fn test_unresolved_market_aborts() {
        let table = Table::new(vec![
            header(),
            row(["2018-01-01 00:00", "ETHBTC", "BUY", "0.05", "1.0", "0.05", "0.0005", "ETH"]),
            row(["2018-01-01 00:00", "XYZABC", "BUY", "1", "1", "1", "0", "BTC"]),
        ]);
        assert_eq!(
            BinanceTradeParser.parse(table, &catalog()).unwrap_err(),
            ConvertError::UnresolvedSymbol { market: "XYZABC".into() }
        );
    }

    #[test]
    fn test_missing_column_is_reported_on_access() {
        // A header subset passes validation, but reading the absent column fails.
        let table = Table::new(vec![
            vec![
                Cell::text("Date(UTC)"),
                Cell::text("Market"),
                Cell::text("Type"),
                Cell::text("Price"),
                Cell::text("Amount"),
                Cell::text("Total"),
            ],
            row(["2018-01-01 00:00", "ETHBTC", "BUY", "0.05", "1.0", "0.05", "", ""])
                .into_iter()
                .take(6)
                .collect(),
        ]);
        assert_eq!(
            BinanceTradeParser.parse(table, &catalog()).unwrap_err(),
            ConvertError::UnknownColumn { column: "Fee".into() }
        );
    }

    #[test]
    fn test_same_currency_market_is_rejected() {
        let table = Table::new(vec![
            header(),
            row(["2018-01-01 00:00", "BTCBTC", "BUY", "1", "1", "1", "0", "BTC"]),
        ]);
        assert_eq!(
            BinanceTradeParser.parse(table, &catalog()).unwrap_err(),
            ConvertError::SameCurrencyPair { currency: "BTC".into() }
        );
    }

    #[test]
    fn test_header_only_yields_nothing() {
        let table = Table::new(vec![header()]);
        assert!(BinanceTradeParser.parse(table, &catalog()).unwrap().is_empty());
    }
}
