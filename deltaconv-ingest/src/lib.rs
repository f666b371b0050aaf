//! deltaconv-ingest: reading exchange exports and parsing them into
//! normalized trades and deposits.

pub mod parsers;
pub mod reader;

pub use parsers::{
    BinanceCrawlerDepositParser, BinanceCrawlerParser, BinanceDepositParser, BinanceTradeParser,
    DepositParser, History, SourceFormat, SourceParser,
};
pub use reader::{read_table, read_table_from};
