//! Trade dumps written by the Binance crawler (`;`-separated by default).
//!
//! `time` is a Unix timestamp in milliseconds (UTC). The market sits in
//! `symbol`; `qty` is the base amount and `totalQuota` the quote amount.

use chrono::{DateTime, NaiveDateTime};
use deltaconv_core::{Cell, Column, Result};

use super::{SourceParser, TradeFields, decode_epoch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlerColumn {
    Time,
    Side,
    TradeId,
    Qty,
    FeeAsset,
    Symbol,
    TotalQuota,
    RealPnl,
    QuoteAsset,
    BaseAsset,
    Id,
    Fee,
    Price,
    ActiveBuy,
}

impl Column for CrawlerColumn {
    const ALL: &'static [Self] = &[
        CrawlerColumn::Time,
        CrawlerColumn::Side,
        CrawlerColumn::TradeId,
        CrawlerColumn::Qty,
        CrawlerColumn::FeeAsset,
        CrawlerColumn::Symbol,
        CrawlerColumn::TotalQuota,
        CrawlerColumn::RealPnl,
        CrawlerColumn::QuoteAsset,
        CrawlerColumn::BaseAsset,
        CrawlerColumn::Id,
        CrawlerColumn::Fee,
        CrawlerColumn::Price,
        CrawlerColumn::ActiveBuy,
    ];

    fn name(self) -> &'static str {
        match self {
            CrawlerColumn::Time => "time",
            CrawlerColumn::Side => "side",
            CrawlerColumn::TradeId => "tradeId",
            CrawlerColumn::Qty => "qty",
            CrawlerColumn::FeeAsset => "feeAsset",
            CrawlerColumn::Symbol => "symbol",
            CrawlerColumn::TotalQuota => "totalQuota",
            CrawlerColumn::RealPnl => "realPnl",
            CrawlerColumn::QuoteAsset => "quoteAsset",
            CrawlerColumn::BaseAsset => "baseAsset",
            CrawlerColumn::Id => "id",
            CrawlerColumn::Fee => "fee",
            CrawlerColumn::Price => "price",
            CrawlerColumn::ActiveBuy => "activeBuy",
        }
    }
}

pub struct BinanceCrawlerParser;

impl SourceParser for BinanceCrawlerParser {
    type Column = CrawlerColumn;

    const EXCHANGE: &'static str = "Binance";

    const FIELDS: TradeFields<CrawlerColumn> = TradeFields {
        timestamp: CrawlerColumn::Time,
        market: CrawlerColumn::Symbol,
        trade_type: CrawlerColumn::Side,
        price: CrawlerColumn::Price,
        base_amount: CrawlerColumn::Qty,
        quote_amount: CrawlerColumn::TotalQuota,
        fee: CrawlerColumn::Fee,
        fee_currency: CrawlerColumn::FeeAsset,
    };

    fn decode_timestamp(&self, cell: &Cell) -> Result<NaiveDateTime> {
        decode_epoch(cell, CrawlerColumn::Time.name(), DateTime::from_timestamp_millis)
    }
}
