//! Name-over-position access to table rows.
//!
//! A [`Row`] either wraps a body row read from a file (read mode) or starts
//! empty from a target header and is filled field by field before being
//! flattened back into header order (write mode). Either way, a name that is
//! not in the header is an error, never a silent blank.

use std::collections::HashMap;

use crate::error::{ConvertError, Result};
use crate::schema::Column;
use crate::table::Cell;

/// Ordered, duplicate-free list of column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Header {
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut header = Header {
            names: Vec::new(),
            positions: HashMap::new(),
        };
        for name in names {
            let name = name.into();
            if header.positions.contains_key(&name) {
                return Err(ConvertError::DuplicateColumn { column: name });
            }
            header.positions.insert(name.clone(), header.names.len());
            header.names.push(name);
        }
        Ok(header)
    }

    /// Header listing every column of `C` in declaration order.
    pub fn of<C: Column>() -> Self {
        let names: Vec<String> = C::ALL.iter().map(|c| c.name().to_string()).collect();
        let positions = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        Header { names, positions }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.position(name).ok_or_else(|| ConvertError::UnknownColumn {
            column: name.to_string(),
        })
    }
}

/// One row bound to a header.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'h> {
    header: &'h Header,
    cells: Vec<Cell>,
}

impl<'h> Row<'h> {
    /// Bind raw cells to `header`. `line` is the 1-based body row number and
    /// only used for the width error.
    pub fn bind(header: &'h Header, cells: Vec<Cell>, line: usize) -> Result<Self> {
        if cells.len() != header.len() {
            return Err(ConvertError::RowWidth {
                line,
                expected: header.len(),
                found: cells.len(),
            });
        }
        Ok(Row { header, cells })
    }

    /// Empty row ready to be filled in.
    pub fn blank(header: &'h Header) -> Self {
        Row {
            header,
            cells: vec![Cell::Empty; header.len()],
        }
    }

    pub fn get(&self, name: &str) -> Result<&Cell> {
        let i = self.header.require(name)?;
        Ok(&self.cells[i])
    }

    pub fn set(&mut self, name: &str, value: impl Into<Cell>) -> Result<()> {
        let i = self.header.require(name)?;
        self.cells[i] = value.into();
        Ok(())
    }

    pub fn cell<C: Column>(&self, column: C) -> Result<&Cell> {
        self.get(column.name())
    }

    pub fn put<C: Column>(&mut self, column: C, value: impl Into<Cell>) -> Result<()> {
        self.set(column.name(), value)
    }

    /// Set several fields at once; stops at the first unknown name.
    pub fn update<C, V, I>(&mut self, values: I) -> Result<()>
    where
        C: Column,
        V: Into<Cell>,
        I: IntoIterator<Item = (C, V)>,
    {
        for (column, value) in values {
            self.put(column, value)?;
        }
        Ok(())
    }

    /// Cells rendered as strings, in header order.
    pub fn export(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.to_string()).collect()
    }
}
