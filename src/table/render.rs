// src/table/render.rs

use std::io::{self, Write};

use tracing::debug;

use super::row::Row;
use super::schema::Schema;

/// Writes the table as comma-separated lines.
///
/// Every cell is followed by a comma, so lines end with a trailing `,`.
/// Values are written as-is: commas or newlines inside a value are not
/// quoted or escaped.
#[derive(Debug)]
pub struct TableRenderer<W: Write> {
    out: W,
    header_written: bool,
    rows_written: usize,
}

impl<W: Write> TableRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            header_written: false,
            rows_written: 0,
        }
    }

    /// Print the column names. Only the first call writes anything.
    pub fn emit_header(&mut self, schema: &Schema) -> io::Result<()> {
        if self.header_written {
            debug!("header already written; ignoring");
            return Ok(());
        }
        self.write_line(schema.iter())?;
        self.header_written = true;
        Ok(())
    }

    /// Print one row, reading only the schema's columns.
    pub fn emit_row(&mut self, row: &Row, schema: &Schema) -> io::Result<()> {
        let cells = row.cells(schema);
        self.write_line(cells.iter().map(String::as_str))?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line<'a>(&mut self, cells: impl Iterator<Item = &'a str>) -> io::Result<()> {
        let mut line = String::new();
        for cell in cells {
            line.push_str(cell);
            line.push(',');
        }
        line.push('\n');
        self.out.write_all(line.as_bytes())?;
        self.out.flush()
    }
}
