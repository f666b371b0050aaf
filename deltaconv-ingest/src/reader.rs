//! Delimited text files into a raw [`Table`].
//!
//! Every cell comes out as text (or empty); typing is left to the parsers.

use anyhow::{Context, Result};
use deltaconv_core::{Cell, Table};
use std::io::Read;
use std::path::Path;

/// Read a delimited file. Row 0 of the result is the file's header line.
pub fn read_table(path: impl AsRef<Path>, delimiter: u8) -> Result<Table> {
    let path = path.as_ref();
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let table = collect_rows(rdr).with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(path = %path.display(), rows = table.len(), "read table");
    Ok(table)
}

/// Same as [`read_table`] for any reader.
pub fn read_table_from<R: Read>(input: R, delimiter: u8) -> Result<Table> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(input);
    collect_rows(rdr)
}

fn collect_rows<R: Read>(mut rdr: csv::Reader<R>) -> Result<Table> {
    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let cells: Vec<Cell> = record
            .iter()
            .enumerate()
            .map(|(col, value)| {
                if i == 0 && col == 0 {
                    Cell::text(value.trim_start_matches('\u{feff}'))
                } else {
                    Cell::text(value)
                }
            })
            .collect();

        // Trailing blank lines in hand-edited exports
        if cells.iter().all(Cell::is_empty) {
            continue;
        }
        rows.push(cells);
    }
    Ok(Table::new(rows))
}
