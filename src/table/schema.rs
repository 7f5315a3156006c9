// src/table/schema.rs

use super::row::Row;

/// Metadata columns every row starts with, in this order.
pub const METADATA_COLUMNS: [&str; 4] = ["Name", "StartDate", "StopDate", "Status"];

/// Ordered list of output columns.
///
/// Built once from the first projected row and never changed afterwards;
/// later rows are read through it, so keys they add are dropped and keys
/// they lack render empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Take the columns of `row` in its field order.
    pub fn from_row(row: &Row) -> Self {
        Self::new(row.keys().map(str::to_string).collect())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }
}
