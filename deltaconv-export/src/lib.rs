//! deltaconv-export: writers for normalized trades and deposits.

pub mod binance;
pub mod delta;
pub mod dialect;

pub use binance::{BinanceDepositExporter, BinanceTradeExporter};
pub use delta::{CurrencyAliases, DeltaColumn, DeltaExporter, DeltaRecord};
pub use dialect::{Dialect, QuoteStyle};
