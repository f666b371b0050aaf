//! Deposit dumps written by the Binance crawler (`;`-separated by default).
//!
//! `applyTime` is a Unix timestamp in seconds (UTC). The amount sits in
//! `transferAmount`; `statusName` is kept as the status text.

use chrono::{DateTime, NaiveDateTime};
use deltaconv_core::{Cell, Column, Result};

use super::{DepositFields, DepositParser, decode_epoch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlerDepositColumn {
    TxId,
    Direction,
    Coin,
    CurConfirmTimes,
    Status,
    Id,
    ConfirmTimes,
    AssetLabel,
    UserId,
    Address,
    TransferAmount,
    Url,
    AddressUrl,
    Info,
    AddressTag,
    ApplyTime,
    StatusName,
    DirectionName,
    ApplyTimeStr,
    TransactionFee,
}

impl Column for CrawlerDepositColumn {
    const ALL: &'static [Self] = &[
        CrawlerDepositColumn::TxId,
        CrawlerDepositColumn::Direction,
        CrawlerDepositColumn::Coin,
        CrawlerDepositColumn::CurConfirmTimes,
        CrawlerDepositColumn::Status,
        CrawlerDepositColumn::Id,
        CrawlerDepositColumn::ConfirmTimes,
        CrawlerDepositColumn::AssetLabel,
        CrawlerDepositColumn::UserId,
        CrawlerDepositColumn::Address,
        CrawlerDepositColumn::TransferAmount,
        CrawlerDepositColumn::Url,
        CrawlerDepositColumn::AddressUrl,
        CrawlerDepositColumn::Info,
        CrawlerDepositColumn::AddressTag,
        CrawlerDepositColumn::ApplyTime,
        CrawlerDepositColumn::StatusName,
        CrawlerDepositColumn::DirectionName,
        CrawlerDepositColumn::ApplyTimeStr,
        CrawlerDepositColumn::TransactionFee,
    ];

    fn name(self) -> &'static str {
        match self {
            CrawlerDepositColumn::TxId => "txId",
            CrawlerDepositColumn::Direction => "direction",
            CrawlerDepositColumn::Coin => "coin",
            CrawlerDepositColumn::CurConfirmTimes => "curConfirmTimes",
            CrawlerDepositColumn::Status => "status",
            CrawlerDepositColumn::Id => "id",
            CrawlerDepositColumn::ConfirmTimes => "confirmTimes",
            CrawlerDepositColumn::AssetLabel => "assetLabel",
            CrawlerDepositColumn::UserId => "userId",
            CrawlerDepositColumn::Address => "address",
            CrawlerDepositColumn::TransferAmount => "transferAmount",
            CrawlerDepositColumn::Url => "url",
            CrawlerDepositColumn::AddressUrl => "addressUrl",
            CrawlerDepositColumn::Info => "info",
            CrawlerDepositColumn::AddressTag => "addressTag",
            CrawlerDepositColumn::ApplyTime => "applyTime",
            CrawlerDepositColumn::StatusName => "statusName",
            CrawlerDepositColumn::DirectionName => "directionName",
            CrawlerDepositColumn::ApplyTimeStr => "applyTimeStr",
            CrawlerDepositColumn::TransactionFee => "transactionFee",
        }
    }
}

pub struct BinanceCrawlerDepositParser;

impl DepositParser for BinanceCrawlerDepositParser {
    type Column = CrawlerDepositColumn;

    const EXCHANGE: &'static str = "Binance";

    const FIELDS: DepositFields<CrawlerDepositColumn> = DepositFields {
        timestamp: CrawlerDepositColumn::ApplyTime,
        coin: CrawlerDepositColumn::Coin,
        amount: CrawlerDepositColumn::TransferAmount,
        fee: CrawlerDepositColumn::TransactionFee,
        address: CrawlerDepositColumn::Address,
        source_address: None,
        txid: CrawlerDepositColumn::TxId,
        status: CrawlerDepositColumn::StatusName,
    };

    fn decode_timestamp(&self, cell: &Cell) -> Result<NaiveDateTime> {
        decode_epoch(cell, CrawlerDepositColumn::ApplyTime.name(), |secs| {
            DateTime::from_timestamp(secs, 0)
        })
    }
}
