// src/table/mod.rs

//! Tabular projection of executions.
//!
//! - [`row`] merges execution metadata with extracted fields and owns the
//!   one-time schema latch (`RowProjector`).
//! - [`schema`] is the frozen, ordered column list.
//! - [`render`] writes the header and rows as comma-separated lines.
//!
//! Nothing here performs remote calls; the async pipeline in
//! [`crate::engine`] feeds it.

pub mod render;
pub mod row;
pub mod schema;

pub use render::TableRenderer;
pub use row::{Projection, Row, RowProjector, format_timestamp};
pub use schema::{METADATA_COLUMNS, Schema};
