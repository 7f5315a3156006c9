// src/live/mod.rs

//! Live log viewer.
//!
//! The pipeline forwards every row to a [`RowSink`]. With `--serve`, that
//! sink is a [`LiveLog`], which keeps the records in memory; once the
//! pipeline is done, [`server::serve`] exposes them over HTTP together with
//! a small web viewer.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::table::{Row, Schema};

pub mod server;

pub use server::serve;

/// Receiver of projected rows.
pub trait RowSink {
    /// Frozen column order, announced once before the first row.
    fn schema_established(&mut self, _schema: &Schema) {}

    /// Forward one row's fields. Fire-and-forget: no acknowledgement.
    fn log(&mut self, row: &Row);
}

/// Sink used when live serving is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl RowSink for NoopSink {
    fn log(&mut self, _row: &Row) {}
}

/// One forwarded row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveRecord {
    /// 1-based, in forwarding order.
    pub seq: u64,
    pub received_at: DateTime<Utc>,
    pub fields: IndexMap<String, Value>,
}

#[derive(Debug, Default)]
struct LiveLogState {
    columns: Vec<String>,
    records: Vec<LiveRecord>,
}

/// Shared in-memory record store behind the web viewer.
///
/// Clones share the same store: the pipeline writes through one handle and
/// the HTTP handlers read through another.
#[derive(Debug, Clone, Default)]
pub struct LiveLog {
    state: Arc<Mutex<LiveLogState>>,
}

/// Response body of `GET /api/records`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordsSnapshot {
    pub columns: Vec<String>,
    pub records: Vec<LiveRecord>,
}

impl LiveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Columns plus every record with `seq > after`.
    pub fn snapshot_after(&self, after: u64) -> RecordsSnapshot {
        let state = self.lock();
        RecordsSnapshot {
            columns: state.columns.clone(),
            records: state
                .records
                .iter()
                .filter(|r| r.seq > after)
                .cloned()
                .collect(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LiveLogState> {
        // Records are pushed whole, so a poisoned store is still consistent.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RowSink for LiveLog {
    fn schema_established(&mut self, schema: &Schema) {
        self.lock().columns = schema.columns().to_vec();
    }

    fn log(&mut self, row: &Row) {
        let mut state = self.lock();
        let seq = state.records.len() as u64 + 1;
        state.records.push(LiveRecord {
            seq,
            received_at: Utc::now(),
            fields: row.fields().clone(),
        });
    }
}
