use thiserror::Error;

/// Everything that can go wrong while turning an exchange export into
/// normalized transactions.
///
/// None of these are transient: a file either converts completely or the
/// first error is reported as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The observed header carries a column the parser does not know about.
    /// The upstream export format changed and the column mapping is stale.
    #[error("the column '{column}' is unknown, the parser has to be updated")]
    SchemaDrift { column: String },

    #[error("market '{market}' cannot be split into two known currencies")]
    UnresolvedSymbol { market: String },

    #[error("column '{column}': '{value}' is not a valid timestamp")]
    MalformedTimestamp { column: String, value: String },

    #[error("column '{column}': '{value}' {reason}")]
    MalformedValue {
        column: String,
        value: String,
        reason: String,
    },

    /// A row was asked for a column its header does not contain.
    #[error("column '{column}' is not part of the header")]
    UnknownColumn { column: String },

    #[error("column '{column}' appears more than once in the header")]
    DuplicateColumn { column: String },

    #[error("row {line} has {found} cells but the header has {expected}")]
    RowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("trading pair needs two distinct currencies, got {currency} twice")]
    SameCurrencyPair { currency: String },

    #[error("the table is empty, a header row is required")]
    EmptyTable,

    #[error("'{symbol}' is not a valid currency symbol")]
    InvalidSymbol { symbol: String },

    #[error("currency symbol '{symbol}' is listed twice")]
    DuplicateSymbol { symbol: String },
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
