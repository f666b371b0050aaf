//! Portfolio-tracker ("Delta") CSV import layout.
//!
//! Each export call appends a header row followed by one row per
//! record. Calling it twice on the same file therefore leaves two
//! header rows in it; deduplication is the caller's business.
//!
//! Trades fill the base/quote columns. Deposits are transfers: they only
//! carry a base side and fill `Sent / Received from` and `Sent to`.

use anyhow::{Context, Result};
use deltaconv_core::{Column, ConvertError, Deposit, Header, Row, Transaction};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::dialect::Dialect;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Tracker transaction type for incoming transfers.
const DEPOSIT: &str = "DEPOSIT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaColumn {
    /// Date and time of the transaction
    Date,
    Type,
    /// Optional for trades
    Exchange,
    /// Amount traded or transferred, excluding fees
    BaseAmount,
    BaseCurrency,
    /// For trades, the amount received or paid, excluding fees
    QuoteAmount,
    QuoteCurrency,
    Fee,
    FeeCurrency,
    /// ICO only: money invested
    Costs,
    CostsCurrency,
    /// 1 = add the quote to / deduct it from the holdings
    SyncHoldings,
    SentReceivedFrom,
    SentTo,
    Notes,
}

impl Column for DeltaColumn {
    const ALL: &'static [Self] = &[
        DeltaColumn::Date,
        DeltaColumn::Type,
        DeltaColumn::Exchange,
        DeltaColumn::BaseAmount,
        DeltaColumn::BaseCurrency,
        DeltaColumn::QuoteAmount,
        DeltaColumn::QuoteCurrency,
        DeltaColumn::Fee,
        DeltaColumn::FeeCurrency,
        DeltaColumn::Costs,
        DeltaColumn::CostsCurrency,
        DeltaColumn::SyncHoldings,
        DeltaColumn::SentReceivedFrom,
        DeltaColumn::SentTo,
        DeltaColumn::Notes,
    ];

    fn name(self) -> &'static str {
        match self {
            DeltaColumn::Date => "Date",
            DeltaColumn::Type => "Type",
            DeltaColumn::Exchange => "Exchange",
            DeltaColumn::BaseAmount => "Base Amount",
            DeltaColumn::BaseCurrency => "Base currency",
            DeltaColumn::QuoteAmount => "Quote amount",
            DeltaColumn::QuoteCurrency => "Quote currency",
            DeltaColumn::Fee => "Fee",
            DeltaColumn::FeeCurrency => "Fee currency",
            DeltaColumn::Costs => "Costs / Proceeds",
            DeltaColumn::CostsCurrency => "Costs / Proceeds currency",
            DeltaColumn::SyncHoldings => "Sync Holdings",
            DeltaColumn::SentReceivedFrom => "Sent / Received from",
            DeltaColumn::SentTo => "Sent to",
            DeltaColumn::Notes => "Notes",
        }
    }
}

/// Many-to-one ticker rewrites applied on export, e.g. a legacy ticker to
/// the one the tracker uses today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyAliases(BTreeMap<String, String>);

impl Default for CurrencyAliases {
    fn default() -> Self {
        Self(BTreeMap::from([("IOTA".to_string(), "MIOTA".to_string())]))
    }
}

impl CurrencyAliases {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Add or override aliases.
    pub fn extend<I, K, V>(&mut self, aliases: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.0
            .extend(aliases.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    /// The alias of `symbol`, or `symbol` itself.
    pub fn apply<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.0.get(symbol).map(String::as_str).unwrap_or(symbol)
    }
}

/// Anything that becomes one tracker row.
pub trait DeltaRecord {
    fn delta_fields(&self, aliases: &CurrencyAliases) -> Vec<(DeltaColumn, String)>;
}

impl DeltaRecord for Transaction {
    fn delta_fields(&self, aliases: &CurrencyAliases) -> Vec<(DeltaColumn, String)> {
        let (quote, base) = self.trading_pair();
        vec![
            (DeltaColumn::Date, self.timestamp.format(DATE_FORMAT).to_string()),
            (DeltaColumn::Type, self.trade_type.as_str().to_string()),
            (DeltaColumn::Exchange, self.exchange.clone()),
            (DeltaColumn::BaseAmount, base.amount.to_string()),
            (DeltaColumn::BaseCurrency, aliases.apply(base.currency.as_str()).to_string()),
            (DeltaColumn::QuoteAmount, quote.amount.to_string()),
            (DeltaColumn::QuoteCurrency, aliases.apply(quote.currency.as_str()).to_string()),
            (DeltaColumn::Fee, self.fee.amount.to_string()),
            (DeltaColumn::FeeCurrency, aliases.apply(self.fee.currency.as_str()).to_string()),
            (DeltaColumn::SyncHoldings, "1".to_string()),
        ]
    }
}

impl DeltaRecord for Deposit {
    fn delta_fields(&self, aliases: &CurrencyAliases) -> Vec<(DeltaColumn, String)> {
        vec![
            (DeltaColumn::Date, self.timestamp.format(DATE_FORMAT).to_string()),
            (DeltaColumn::Type, DEPOSIT.to_string()),
            (DeltaColumn::Exchange, self.exchange.clone()),
            (DeltaColumn::BaseAmount, self.amount.to_string()),
            (DeltaColumn::BaseCurrency, aliases.apply(self.coin.as_str()).to_string()),
            (DeltaColumn::Fee, self.fee.amount.to_string()),
            (DeltaColumn::FeeCurrency, aliases.apply(self.fee.currency.as_str()).to_string()),
            (DeltaColumn::SyncHoldings, "1".to_string()),
            (DeltaColumn::SentReceivedFrom, self.source_address.clone()),
            (DeltaColumn::SentTo, self.exchange.clone()),
            (DeltaColumn::Notes, self.txid.clone()),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeltaExporter {
    aliases: CurrencyAliases,
    dialect: Dialect,
}

impl DeltaExporter {
    pub fn new(aliases: CurrencyAliases, dialect: Dialect) -> Self {
        Self { aliases, dialect }
    }

    /// Map one record onto the target header.
    pub fn to_row<'h, R: DeltaRecord>(
        &self,
        header: &'h Header,
        record: &R,
    ) -> Result<Row<'h>, ConvertError> {
        let mut row = Row::blank(header);
        row.update(record.delta_fields(&self.aliases))?;
        Ok(row)
    }

    /// Write the header and all records, in order, to `out`.
    pub fn write<R: DeltaRecord, W: Write>(&self, records: &[R], out: W) -> Result<()> {
        let header = Header::of::<DeltaColumn>();
        let mut wtr = self.dialect.writer_builder()?.from_writer(out);

        wtr.write_record(header.names())?;
        for record in records {
            let row = self.to_row(&header, record)?;
            wtr.write_record(row.export())?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Append to `path`, creating the file if needed.
    pub fn export<R: DeltaRecord>(&self, records: &[R], path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening {} for append", path.display()))?;

        self.write(records, file)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            rows = records.len(),
            "appended delta rows"
        );
        Ok(())
    }
}
