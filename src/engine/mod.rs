// src/engine/mod.rs

//! The execution-to-row pipeline.
//!
//! [`Pipeline`] is the async shell that drives the listing pages and
//! describe calls one at a time. The row logic it feeds (schema latch,
//! merge, rendering) is synchronous and lives in [`crate::table`].

use crate::types::MalformedInputPolicy;

pub mod pipeline;

pub use pipeline::Pipeline;

/// Per-run behaviour knobs that are not page ceilings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// What to do with input payloads that are not valid JSON.
    pub on_malformed: MalformedInputPolicy,
    /// When set, stop after exactly this many emitted rows.
    pub strict_limit: Option<usize>,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pages_fetched: usize,
    pub executions_described: usize,
    pub rows_emitted: usize,
    /// Executions dropped by [`MalformedInputPolicy::Skip`].
    pub rows_skipped: usize,
    pub malformed_payloads: usize,
}
