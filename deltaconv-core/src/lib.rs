//! deltaconv-core: currency catalog, market symbol decomposition, the
//! normalized trade and deposit models and schema-checked row access.

pub mod currency;
pub mod deposit;
pub mod error;
pub mod row;
pub mod schema;
pub mod symbol;
pub mod table;
pub mod transaction;

pub use currency::{CurrencyCatalog, CurrencySymbol};
pub use deposit::Deposit;
pub use error::{ConvertError, Result};
pub use row::{Header, Row};
pub use schema::Column;
pub use symbol::{SymbolDecomposer, TradingPair};
pub use table::{Cell, Table};
pub use transaction::{Fee, Position, TradeType, Transaction};
