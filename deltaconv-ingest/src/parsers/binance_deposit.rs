//! Binance "Deposit History" export.
//!
//! Header:
//!   Date,Coin,Amount,TransactionFee,Address,TXID,Source Address,PaymentID,Status
//!
//! Dates use the same text layouts as the trade history export.

use chrono::NaiveDateTime;
use deltaconv_core::{Cell, Column, Result};

use super::{DepositFields, DepositParser, decode_date_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositColumn {
    Date,
    Coin,
    Amount,
    TransactionFee,
    Address,
    TxId,
    SourceAddress,
    PaymentId,
    Status,
}

impl Column for DepositColumn {
    const ALL: &'static [Self] = &[
        DepositColumn::Date,
        DepositColumn::Coin,
        DepositColumn::Amount,
        DepositColumn::TransactionFee,
        DepositColumn::Address,
        DepositColumn::TxId,
        DepositColumn::SourceAddress,
        DepositColumn::PaymentId,
        DepositColumn::Status,
    ];

    fn name(self) -> &'static str {
        match self {
            DepositColumn::Date => "Date",
            DepositColumn::Coin => "Coin",
            DepositColumn::Amount => "Amount",
            DepositColumn::TransactionFee => "TransactionFee",
            DepositColumn::Address => "Address",
            DepositColumn::TxId => "TXID",
            DepositColumn::SourceAddress => "Source Address",
            DepositColumn::PaymentId => "PaymentID",
            DepositColumn::Status => "Status",
        }
    }
}

pub struct BinanceDepositParser;

impl DepositParser for BinanceDepositParser {
    type Column = DepositColumn;

    const EXCHANGE: &'static str = "Binance";

    const FIELDS: DepositFields<DepositColumn> = DepositFields {
        timestamp: DepositColumn::Date,
        coin: DepositColumn::Coin,
        amount: DepositColumn::Amount,
        fee: DepositColumn::TransactionFee,
        address: DepositColumn::Address,
        source_address: Some(DepositColumn::SourceAddress),
        txid: DepositColumn::TxId,
        status: DepositColumn::Status,
    };

    fn decode_timestamp(&self, cell: &Cell) -> Result<NaiveDateTime> {
        decode_date_text(cell, DepositColumn::Date.name())
    }
}
