//! Write records back out in Binance's own export layouts.
//!
//! Rows are sorted by time. For trades `Total` is recomputed as price times
//! amount. Unlike the Delta export this replaces the destination file.

use anyhow::{Context, Result};
use deltaconv_core::{Column, ConvertError, Deposit, Header, Row, Transaction};
use deltaconv_ingest::parsers::{DepositColumn, TradeColumn};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::dialect::Dialect;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Default)]
pub struct BinanceTradeExporter {
    dialect: Dialect,
}

impl BinanceTradeExporter {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn to_row<'h>(&self, header: &'h Header, t: &Transaction) -> Result<Row<'h>, ConvertError> {
        let (quote, base) = t.trading_pair();
        let total = t
            .price
            .checked_mul(base.amount)
            .ok_or_else(|| ConvertError::MalformedValue {
                column: TradeColumn::Total.name().to_string(),
                value: format!("{} * {}", t.price, base.amount),
                reason: "overflows".to_string(),
            })?;

        let mut row = Row::blank(header);
        row.update([
            (TradeColumn::Date, t.timestamp.format(DATE_FORMAT).to_string()),
            (
                TradeColumn::Market,
                format!("{}{}", base.currency.as_str().to_uppercase(), quote.currency),
            ),
            (TradeColumn::Type, t.trade_type.as_str().to_string()),
            (TradeColumn::Price, t.price.to_string()),
            (TradeColumn::Amount, base.amount.to_string()),
            (TradeColumn::Total, total.to_string()),
            (TradeColumn::Fee, t.fee.amount.to_string()),
            (TradeColumn::FeeCoin, t.fee.currency.as_str().to_uppercase()),
        ])?;
        Ok(row)
    }

    pub fn write<W: Write>(&self, transactions: &[Transaction], out: W) -> Result<()> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by_key(|t| t.timestamp);

        let header = Header::of::<TradeColumn>();
        let mut wtr = self.dialect.writer_builder()?.from_writer(out);
        wtr.write_record(header.names())?;
        for t in sorted {
            wtr.write_record(self.to_row(&header, t)?.export())?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn export(&self, transactions: &[Transaction], path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        self.write(transactions, file)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            transactions = transactions.len(),
            "wrote binance trade history"
        );
        Ok(())
    }
}

/// Deposits in the "Deposit History" layout. `PaymentID` is left blank.
#[derive(Debug, Clone, Default)]
pub struct BinanceDepositExporter {
    dialect: Dialect,
}

impl BinanceDepositExporter {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn to_row<'h>(&self, header: &'h Header, d: &Deposit) -> Result<Row<'h>, ConvertError> {
        let mut row = Row::blank(header);
        row.update([
            (DepositColumn::Date, d.timestamp.format(DATE_FORMAT).to_string()),
            (DepositColumn::Coin, d.coin.to_string()),
            (DepositColumn::Amount, d.amount.to_string()),
            (DepositColumn::TransactionFee, d.fee.amount.to_string()),
            (DepositColumn::Address, d.address.clone()),
            (DepositColumn::TxId, d.txid.clone()),
            (DepositColumn::SourceAddress, d.source_address.clone()),
            (DepositColumn::Status, d.status.clone()),
        ])?;
        Ok(row)
    }

    pub fn write<W: Write>(&self, deposits: &[Deposit], out: W) -> Result<()> {
        let mut sorted: Vec<&Deposit> = deposits.iter().collect();
        sorted.sort_by_key(|d| d.timestamp);

        let header = Header::of::<DepositColumn>();
        let mut wtr = self.dialect.writer_builder()?.from_writer(out);
        wtr.write_record(header.names())?;
        for d in sorted {
            wtr.write_record(self.to_row(&header, d)?.export())?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn export(&self, deposits: &[Deposit], path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        self.write(deposits, file)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            deposits = deposits.len(),
            "wrote binance deposit history"
        );
        Ok(())
    }
}
