// src/table/row.rs

use chrono::{DateTime, Local, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::extract::ExtractedFields;
use crate::source::ExecutionSummary;

use super::schema::Schema;

/// All fields of one execution: the metadata columns followed by the
/// extracted fields, in merge order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    fields: IndexMap<String, Value>,
}

impl Row {
    /// Merge metadata and extracted fields.
    ///
    /// An extracted key that collides with a metadata column replaces the
    /// metadata value but keeps the metadata position.
    pub fn merge(summary: &ExecutionSummary, extracted: ExtractedFields) -> Self {
        let mut fields = IndexMap::with_capacity(4 + extracted.len());
        fields.insert("Name".to_string(), Value::String(summary.name.clone()));
        fields.insert(
            "StartDate".to_string(),
            Value::String(format_timestamp(&summary.start_date)),
        );
        fields.insert(
            "StopDate".to_string(),
            match &summary.stop_date {
                Some(ts) => Value::String(format_timestamp(ts)),
                None => Value::Null,
            },
        );
        fields.insert(
            "Status".to_string(),
            Value::String(summary.status.to_string()),
        );

        for (key, value) in extracted {
            fields.insert(key, value);
        }

        Self { fields }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    /// Display text of one column; absent columns are empty.
    pub fn cell(&self, column: &str) -> String {
        match self.fields.get(column) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Display text of every schema column, in schema order.
    pub fn cells(&self, schema: &Schema) -> Vec<String> {
        schema.iter().map(|column| self.cell(column)).collect()
    }
}

/// Local date and time, to the second: `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Result of projecting one execution.
#[derive(Debug)]
pub struct Projection<'a> {
    pub row: Row,
    pub schema: &'a Schema,
    /// `true` only for the projection that established the schema.
    pub established: bool,
}

/// Merges executions into rows and latches the schema on the first one.
#[derive(Debug, Default)]
pub struct RowProjector {
    schema: Option<Schema>,
}

impl RowProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The frozen schema, once the first row has been projected.
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    pub fn project(
        &mut self,
        summary: &ExecutionSummary,
        extracted: ExtractedFields,
    ) -> Projection<'_> {
        self.project_row(Row::merge(summary, extracted))
    }

    /// Project an already merged row.
    pub fn project_row(&mut self, row: Row) -> Projection<'_> {
        let established = self.schema.is_none();
        let schema = self.schema.get_or_insert_with(|| Schema::from_row(&row));

        if established {
            debug!(columns = ?schema.columns(), "schema established");
        } else if row.keys().any(|k| !schema.columns().iter().any(|c| c == k)) {
            debug!(execution = %row.cell("Name"), "row has fields outside the schema; dropping them");
        }

        Projection {
            row,
            schema,
            established,
        }
    }
}
