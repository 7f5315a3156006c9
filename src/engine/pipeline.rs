// src/engine/pipeline.rs

use std::fmt;
use std::io::Write;

use tracing::{debug, info, warn};

use crate::errors::{Result, SfnviewError};
use crate::extract::{ExtractedFields, Extraction, FieldExtractor};
use crate::live::RowSink;
use crate::source::{ExecutionBackend, ExecutionSource, ExecutionSummary};
use crate::table::{Row, RowProjector, Schema, TableRenderer};
use crate::types::MalformedInputPolicy;

use super::{RunOptions, RunSummary};

/// Lists executions, describes each one, extracts its fields and renders
/// the resulting rows.
///
/// Everything runs sequentially: one page, one describe call, one row at a
/// time. The first remote or query error ends the run; rows already
/// rendered stay written.
///
/// Only a row whose extraction succeeded may fix the schema. Rows kept
/// under [`MalformedInputPolicy::Empty`] before that point are held back
/// and written, in order, right after the header.
pub struct Pipeline<B: ExecutionBackend> {
    source: ExecutionSource<B>,
    extractor: FieldExtractor,
    projector: RowProjector,
    options: RunOptions,
    held: Vec<Row>,
}

impl<B: ExecutionBackend> fmt::Debug for Pipeline<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("extractor", &self.extractor)
            .field("projector", &self.projector)
            .field("options", &self.options)
            .field("held", &self.held.len())
            .finish_non_exhaustive()
    }
}

impl<B: ExecutionBackend> Pipeline<B> {
    pub fn new(source: ExecutionSource<B>, extractor: FieldExtractor, options: RunOptions) -> Self {
        Self {
            source,
            extractor,
            projector: RowProjector::new(),
            options,
            held: Vec::new(),
        }
    }

    pub fn projector(&self) -> &RowProjector {
        &self.projector
    }

    /// Run to completion.
    ///
    /// The header is written just before the first row; a run that yields
    /// no rows writes nothing at all. If every row came from a malformed
    /// payload, the held rows are written at the end against a
    /// metadata-only schema.
    pub async fn run<W: Write>(
        &mut self,
        renderer: &mut TableRenderer<W>,
        sink: &mut dyn RowSink,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        let walked = self.walk(renderer, sink, &mut summary).await;
        let released = self.release_held(renderer, sink, &mut summary);
        walked?;
        released?;

        summary.pages_fetched = self.source.pages_fetched();
        info!(
            pages = summary.pages_fetched,
            described = summary.executions_described,
            rows = summary.rows_emitted,
            skipped = summary.rows_skipped,
            malformed = summary.malformed_payloads,
            "run complete"
        );
        Ok(summary)
    }

    async fn walk<W: Write>(
        &mut self,
        renderer: &mut TableRenderer<W>,
        sink: &mut dyn RowSink,
        summary: &mut RunSummary,
    ) -> Result<()> {
        'pages: loop {
            if self.strict_limit_reached(summary) {
                break;
            }
            let Some(page) = self.source.next_page().await? else {
                break;
            };

            for execution in page {
                if self.strict_limit_reached(summary) {
                    info!(limit = ?self.options.strict_limit, "strict limit reached; stopping");
                    break 'pages;
                }
                self.process(&execution, renderer, sink, summary).await?;
            }
        }
        Ok(())
    }

    async fn process<W: Write>(
        &mut self,
        execution: &ExecutionSummary,
        renderer: &mut TableRenderer<W>,
        sink: &mut dyn RowSink,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let detail = self
            .source
            .backend_mut()
            .describe_execution(execution.execution_arn.clone())
            .await?;
        summary.executions_described += 1;

        let extracted = match self.extractor.extract(detail.input.as_deref())? {
            Extraction::Fields(fields) => fields,
            Extraction::Malformed(err) => {
                summary.malformed_payloads += 1;
                match self.options.on_malformed {
                    MalformedInputPolicy::Empty => {
                        warn!(execution = %execution.name, error = %err, "input is not valid JSON; using an empty document");
                        if self.projector.schema().is_none() {
                            debug!(execution = %execution.name, "no schema yet; holding row");
                            self.held.push(Row::merge(execution, ExtractedFields::new()));
                            return Ok(());
                        }
                        ExtractedFields::new()
                    }
                    MalformedInputPolicy::Skip => {
                        warn!(execution = %execution.name, error = %err, "input is not valid JSON; skipping execution");
                        summary.rows_skipped += 1;
                        return Ok(());
                    }
                    MalformedInputPolicy::Abort => {
                        return Err(SfnviewError::MalformedInput {
                            execution: execution.name.clone(),
                            source: err,
                        });
                    }
                }
            }
        };

        let projection = self.projector.project(execution, extracted);
        if projection.established {
            renderer.emit_header(projection.schema)?;
            sink.schema_established(projection.schema);
            for row in self.held.drain(..) {
                write_row(&row, projection.schema, renderer, sink, summary)?;
            }
        }
        write_row(&projection.row, projection.schema, renderer, sink, summary)?;

        debug!(execution = %execution.name, status = %execution.status, "row emitted");
        Ok(())
    }

    /// Write rows still held because no extraction ever succeeded.
    fn release_held<W: Write>(
        &mut self,
        renderer: &mut TableRenderer<W>,
        sink: &mut dyn RowSink,
        summary: &mut RunSummary,
    ) -> Result<()> {
        for row in std::mem::take(&mut self.held) {
            let projection = self.projector.project_row(row);
            if projection.established {
                renderer.emit_header(projection.schema)?;
                sink.schema_established(projection.schema);
            }
            write_row(&projection.row, projection.schema, renderer, sink, summary)?;
        }
        Ok(())
    }

    /// Held rows count towards the strict limit: they are written later.
    fn strict_limit_reached(&self, summary: &RunSummary) -> bool {
        self.options
            .strict_limit
            .is_some_and(|limit| summary.rows_emitted + self.held.len() >= limit)
    }
}

fn write_row<W: Write>(
    row: &Row,
    schema: &Schema,
    renderer: &mut TableRenderer<W>,
    sink: &mut dyn RowSink,
    summary: &mut RunSummary,
) -> Result<()> {
    renderer.emit_row(row, schema)?;
    sink.log(row);
    summary.rows_emitted += 1;
    Ok(())
}
