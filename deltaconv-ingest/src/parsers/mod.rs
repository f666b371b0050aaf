//! Exchange-specific history parsers.
//!
//! Every format shares the same pipeline: validate the header against the
//! format's columns, bind each body row, then build a record from it. Trade
//! formats split the market symbol and produce [`Transaction`]s; deposit
//! formats produce [`Deposit`]s. A format only supplies its column set,
//! which column carries which field, and its timestamp rule.

pub mod binance_crawler;
pub mod binance_crawler_deposit;
pub mod binance_deposit;
pub mod binance_trade;

use chrono::{DateTime, NaiveDateTime, Utc};
use deltaconv_core::{
    Cell, Column, ConvertError, CurrencyCatalog, Deposit, Fee, Position, Result, Row,
    SymbolDecomposer, Table, TradeType, Transaction, schema,
};
use std::fmt;
use std::str::FromStr;

pub use binance_crawler::{BinanceCrawlerParser, CrawlerColumn};
pub use binance_crawler_deposit::{BinanceCrawlerDepositParser, CrawlerDepositColumn};
pub use binance_deposit::{BinanceDepositParser, DepositColumn};
pub use binance_trade::{BinanceTradeParser, TradeColumn};

/// Which column of a format holds which transaction field.
#[derive(Debug, Clone, Copy)]
pub struct TradeFields<C> {
    pub timestamp: C,
    pub market: C,
    pub trade_type: C,
    pub price: C,
    pub base_amount: C,
    pub quote_amount: C,
    pub fee: C,
    pub fee_currency: C,
}

pub trait SourceParser {
    type Column: Column;

    /// Exchange name stamped on every transaction.
    const EXCHANGE: &'static str;

    const FIELDS: TradeFields<Self::Column>;

    fn decode_timestamp(&self, cell: &Cell) -> Result<NaiveDateTime>;

    /// Parse a whole table. The first error aborts the file.
    fn parse(&self, table: Table, catalog: &CurrencyCatalog) -> Result<Vec<Transaction>> {
        let (header, body) = table.into_parts()?;
        schema::validate::<Self::Column>(&header)?;

        let decomposer = SymbolDecomposer::new(catalog);
        let mut transactions = Vec::with_capacity(body.len());
        for (i, cells) in body.into_iter().enumerate() {
            let row = Row::bind(&header, cells, i + 1)?;
            transactions.push(self.convert(&row, &decomposer)?);
        }

        tracing::info!(
            exchange = Self::EXCHANGE,
            transactions = transactions.len(),
            "parsed trade history"
        );
        Ok(transactions)
    }

    /// Turn one bound row into a transaction.
    fn convert(&self, row: &Row<'_>, decomposer: &SymbolDecomposer<'_>) -> Result<Transaction> {
        let f = Self::FIELDS;

        let market = row.cell(f.market)?.to_string();
        let pair = decomposer.resolve(&market)?;

        let timestamp = self.decode_timestamp(row.cell(f.timestamp)?)?;

        let type_cell = row.cell(f.trade_type)?;
        let trade_type = TradeType::from_str(&type_cell.to_string()).map_err(|reason| {
            ConvertError::MalformedValue {
                column: f.trade_type.name().to_string(),
                value: type_cell.to_string(),
                reason,
            }
        })?;

        let decimal = |c: Self::Column| row.cell(c)?.to_decimal(c.name());
        let quote = Position::new(decimal(f.quote_amount)?, pair.quote);
        let base = Position::new(decimal(f.base_amount)?, pair.base);
        let price = decimal(f.price)?;

        let fee = Fee::new(
            row.cell(f.fee)?.to_decimal_or_zero(f.fee.name())?,
            row.cell(f.fee_currency)?.to_string(),
        );

        tracing::trace!(%market, %timestamp, "converted row");
        Transaction::new(timestamp, (quote, base), trade_type, price, fee, Self::EXCHANGE)
    }
}

/// Which column of a deposit format holds which field.
#[derive(Debug, Clone, Copy)]
pub struct DepositFields<C> {
    pub timestamp: C,
    pub coin: C,
    pub amount: C,
    pub fee: C,
    pub address: C,
    pub source_address: Option<C>,
    pub txid: C,
    pub status: C,
}

pub trait DepositParser {
    type Column: Column;

    const EXCHANGE: &'static str;

    const FIELDS: DepositFields<Self::Column>;

    fn decode_timestamp(&self, cell: &Cell) -> Result<NaiveDateTime>;

    /// Parse a whole deposit table. The first error aborts the file.
    fn parse(&self, table: Table) -> Result<Vec<Deposit>> {
        let (header, body) = table.into_parts()?;
        schema::validate::<Self::Column>(&header)?;

        let mut deposits = Vec::with_capacity(body.len());
        for (i, cells) in body.into_iter().enumerate() {
            let row = Row::bind(&header, cells, i + 1)?;
            deposits.push(self.convert(&row)?);
        }

        tracing::info!(
            exchange = Self::EXCHANGE,
            deposits = deposits.len(),
            "parsed deposit history"
        );
        Ok(deposits)
    }

    fn convert(&self, row: &Row<'_>) -> Result<Deposit> {
        let f = Self::FIELDS;
        let text = |c: Self::Column| row.cell(c).map(Cell::to_string);

        let coin_cell = row.cell(f.coin)?;
        if coin_cell.is_empty() {
            return Err(ConvertError::MalformedValue {
                column: f.coin.name().to_string(),
                value: String::new(),
                reason: "is empty".to_string(),
            });
        }
        let coin = coin_cell.to_string();

        let deposit = Deposit {
            timestamp: self.decode_timestamp(row.cell(f.timestamp)?)?,
            amount: row.cell(f.amount)?.to_decimal(f.amount.name())?,
            fee: Fee::new(
                row.cell(f.fee)?.to_decimal_or_zero(f.fee.name())?,
                coin.as_str(),
            ),
            coin: coin.into(),
            address: text(f.address)?,
            source_address: f.source_address.map(text).transpose()?.unwrap_or_default(),
            txid: text(f.txid)?,
            status: text(f.status)?,
            exchange: Self::EXCHANGE.to_string(),
        };
        tracing::trace!(coin = %deposit.coin, timestamp = %deposit.timestamp, "converted deposit");
        Ok(deposit)
    }
}

/// Date layouts seen in text cells of Binance exports, newest first. Older
/// exports wrote `31.12.17 23:59`.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%d.%m.%y %H:%M"];

/// A spreadsheet-typed date or one of [`DATE_FORMATS`].
pub(crate) fn decode_date_text(cell: &Cell, column: &str) -> Result<NaiveDateTime> {
    match cell {
        Cell::DateTime(dt) => Ok(*dt),
        Cell::Text(s) => DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .ok_or_else(|| malformed_timestamp(cell, column)),
        _ => Err(malformed_timestamp(cell, column)),
    }
}

/// A Unix timestamp as naive UTC. `from_epoch` fixes the unit.
pub(crate) fn decode_epoch(
    cell: &Cell,
    column: &str,
    from_epoch: fn(i64) -> Option<DateTime<Utc>>,
) -> Result<NaiveDateTime> {
    if let Cell::DateTime(dt) = cell {
        return Ok(*dt);
    }
    let value = cell
        .to_i64(column)
        .map_err(|_| malformed_timestamp(cell, column))?;
    from_epoch(value)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| malformed_timestamp(cell, column))
}

fn malformed_timestamp(cell: &Cell, column: &str) -> ConvertError {
    ConvertError::MalformedTimestamp {
        column: column.to_string(),
        value: cell.to_string(),
    }
}

/// Records parsed from one file.
#[derive(Debug, Clone, PartialEq)]
pub enum History {
    Trades(Vec<Transaction>),
    Deposits(Vec<Deposit>),
}

impl History {
    pub fn len(&self) -> usize {
        match self {
            History::Trades(t) => t.len(),
            History::Deposits(d) => d.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `trades` or `deposits`, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            History::Trades(_) => "trades",
            History::Deposits(_) => "deposits",
        }
    }
}

/// The input formats known to the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Binance "Trade History" export.
    BinanceTrade,
    /// CSV dump written by the Binance crawler.
    BinanceCrawler,
    /// Binance "Deposit History" export.
    BinanceDeposit,
    /// Deposit dump written by the Binance crawler.
    BinanceCrawlerDeposit,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 4] = [
        SourceFormat::BinanceTrade,
        SourceFormat::BinanceCrawler,
        SourceFormat::BinanceDeposit,
        SourceFormat::BinanceCrawlerDeposit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SourceFormat::BinanceTrade => "binance-trade",
            SourceFormat::BinanceCrawler => "binance-crawler",
            SourceFormat::BinanceDeposit => "binance-deposit",
            SourceFormat::BinanceCrawlerDeposit => "binance-crawler-deposit",
        }
    }

    /// Field delimiter the format is usually written with.
    pub fn default_delimiter(self) -> u8 {
        match self {
            SourceFormat::BinanceTrade | SourceFormat::BinanceDeposit => b',',
            SourceFormat::BinanceCrawler | SourceFormat::BinanceCrawlerDeposit => b';',
        }
    }

    /// Deposit formats ignore `catalog`; only trade markets need splitting.
    pub fn parse(self, table: Table, catalog: &CurrencyCatalog) -> Result<History> {
        Ok(match self {
            SourceFormat::BinanceTrade => History::Trades(BinanceTradeParser.parse(table, catalog)?),
            SourceFormat::BinanceCrawler => {
                History::Trades(BinanceCrawlerParser.parse(table, catalog)?)
            }
            SourceFormat::BinanceDeposit => History::Deposits(BinanceDepositParser.parse(table)?),
            SourceFormat::BinanceCrawlerDeposit => {
                History::Deposits(BinanceCrawlerDepositParser.parse(table)?)
            }
        })
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SourceFormat::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| {
                let known: Vec<_> = SourceFormat::ALL.iter().map(|f| f.name()).collect();
                format!("unknown format '{s}' (expected one of: {})", known.join(", "))
            })
    }
}
