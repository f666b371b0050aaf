//! Loosely typed tabular input: a header row followed by body rows.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConvertError, Result};
use crate::row::Header;

/// A single table cell. Readers that already know a cell's type (e.g. a
/// spreadsheet date) hand it over typed; CSV readers only produce text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Trimmed text; blank text becomes [`Cell::Empty`].
    pub fn text(value: impl AsRef<str>) -> Self {
        let value = value.as_ref().trim();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Read the cell as a decimal number. `column` is only used for the error.
    ///
    /// Accepts thousands separators and scientific notation in text cells.
    pub fn to_decimal(&self, column: &str) -> Result<Decimal> {
        match self {
            Cell::Decimal(d) => Ok(*d),
            Cell::Integer(i) => Ok(Decimal::from(*i)),
            Cell::Text(s) => {
                let cleaned = s.replace(',', "");
                Decimal::from_str(&cleaned)
                    .or_else(|_| Decimal::from_scientific(&cleaned))
                    .map_err(|_| malformed(column, self, "is not a number"))
            }
            Cell::Empty | Cell::DateTime(_) => Err(malformed(column, self, "is not a number")),
        }
    }

    /// Like [`to_decimal`](Self::to_decimal), but an empty cell reads as zero.
    pub fn to_decimal_or_zero(&self, column: &str) -> Result<Decimal> {
        match self {
            Cell::Empty => Ok(Decimal::ZERO),
            other => other.to_decimal(column),
        }
    }

    pub fn to_i64(&self, column: &str) -> Result<i64> {
        match self {
            Cell::Integer(i) => Ok(*i),
            Cell::Decimal(d) if d.fract().is_zero() => d
                .to_i64()
                .ok_or_else(|| malformed(column, self, "is out of range")),
            Cell::Text(s) => s
                .parse()
                .map_err(|_| malformed(column, self, "is not an integer")),
            _ => Err(malformed(column, self, "is not an integer")),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Decimal(d) => write!(f, "{d}"),
            Cell::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::text(value)
    }
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        Cell::Decimal(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Cell::DateTime(value)
    }
}

fn malformed(column: &str, cell: &Cell, reason: &str) -> ConvertError {
    ConvertError::MalformedValue {
        column: column.to_string(),
        value: cell.to_string(),
        reason: reason.to_string(),
    }
}

/// Raw table as handed over by a reader. Row 0 is the header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Split off the header row.
    pub fn into_parts(self) -> Result<(Header, Vec<Vec<Cell>>)> {
        let mut rows = self.rows.into_iter();
        let header = rows.next().ok_or(ConvertError::EmptyTable)?;
        let header = Header::new(header.iter().map(|c| c.to_string()))?;
        Ok((header, rows.collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_cells_are_trimmed() {
        assert_eq!(Cell::text("  ETHBTC "), Cell::Text("ETHBTC".into()));
        assert_eq!(Cell::text("   "), Cell::Empty);
    }

    #[test]
    fn test_decimal_from_text() {
        assert_eq!(Cell::text("0.05").to_decimal("Price").unwrap(), Decimal::new(5, 2));
        assert_eq!(Cell::text("1,234.5").to_decimal("Total").unwrap(), Decimal::new(12345, 1));
        assert_eq!(Cell::text("5e-4").to_decimal("Fee").unwrap(), Decimal::new(5, 4));
        assert_eq!(Cell::Empty.to_decimal_or_zero("Fee").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_decimal_error_names_column() {
        let err = Cell::text("abc").to_decimal("Price").unwrap_err();
        assert_eq!(
            err,
            ConvertError::MalformedValue {
                column: "Price".into(),
                value: "abc".into(),
                reason: "is not a number".into(),
            }
        );
    }

    #[test]
    fn test_integer_cells() {
        assert_eq!(Cell::text("1514764800000").to_i64("time").unwrap(), 1_514_764_800_000);
        assert_eq!(Cell::Decimal(Decimal::new(420, 1)).to_i64("time").unwrap(), 42);
        assert!(Cell::Decimal(Decimal::new(425, 1)).to_i64("time").is_err());
    }

    #[test]
    fn test_into_parts_requires_header() {
        assert_eq!(Table::default().into_parts().unwrap_err(), ConvertError::EmptyTable);

        let table = Table::new(vec![vec!["a".into(), "b".into()], vec!["1".into(), "2".into()]]);
        let (header, body) = table.into_parts().unwrap();
        assert_eq!(header.names(), ["a", "b"]);
        assert_eq!(body.len(), 1);
    }
}
