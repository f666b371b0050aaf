//! Incoming transfers to an exchange account.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::CurrencySymbol;
use crate::transaction::Fee;

/// One deposit as reported by the exchange.
///
/// `status` is kept verbatim (`Completed`, `Pending`, ...); nothing is
/// filtered on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub timestamp: NaiveDateTime,
    pub coin: CurrencySymbol,
    pub amount: Decimal,
    /// Charged in `coin`.
    pub fee: Fee,
    /// Receiving address on the exchange.
    pub address: String,
    /// Sending address, blank when the source does not report it.
    pub source_address: String,
    pub txid: String,
    pub status: String,
    pub exchange: String,
}
