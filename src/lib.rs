// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod extract;
pub mod live;
pub mod logging;
pub mod source;
pub mod table;
pub mod types;

use std::io::Write;

use anyhow::Result;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::RunConfig;
use crate::engine::{Pipeline, RunSummary};
use crate::extract::{FieldExtractor, Query};
use crate::live::{LiveLog, NoopSink, RowSink};
use crate::source::{ExecutionBackend, ExecutionSource, SfnBackend};
use crate::table::TableRenderer;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config resolution (flags + optional config file)
/// - the Step Functions backend
/// - the row pipeline writing to stdout
/// - (optional) the live viewer, served after the pipeline completes
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = config::resolve(&args)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    // Fail on a bad expression before any credentials or remote calls.
    let query = Query::compile(&cfg.expression)?;

    let backend = SfnBackend::from_shared_config(cfg.region.clone(), cfg.profile.clone()).await;
    let stdout = std::io::stdout().lock();

    if !cfg.serve {
        run_with_query(backend, query, &cfg, stdout, &mut NoopSink).await?;
        return Ok(());
    }

    let mut live = LiveLog::new();
    run_with_query(backend, query, &cfg, stdout, &mut live).await?;
    live::serve(live, cfg.bind).await
}

/// Run the pipeline against any backend, writing the table to `out`.
///
/// The expression is compiled before the backend is touched, so an invalid
/// one fails with no remote calls and no output.
pub async fn run_pipeline<B, W>(
    backend: B,
    cfg: &RunConfig,
    out: W,
    sink: &mut dyn RowSink,
) -> errors::Result<RunSummary>
where
    B: ExecutionBackend,
    W: Write,
{
    let query = Query::compile(&cfg.expression)?;
    run_with_query(backend, query, cfg, out, sink).await
}

async fn run_with_query<B, W>(
    backend: B,
    query: Query,
    cfg: &RunConfig,
    out: W,
    sink: &mut dyn RowSink,
) -> errors::Result<RunSummary>
where
    B: ExecutionBackend,
    W: Write,
{
    info!(
        state_machine = %cfg.state_machine_arn,
        expression = %query.as_str(),
        "listing executions"
    );

    let source = ExecutionSource::new(backend, cfg.state_machine_arn.clone(), cfg.limits);
    let mut pipeline = Pipeline::new(source, FieldExtractor::new(query), cfg.run_options());
    let mut renderer = TableRenderer::new(out);

    pipeline.run(&mut renderer, sink).await
}

/// Simple dry-run output: print the resolved configuration.
fn print_dry_run(cfg: &RunConfig) {
    println!("sfnview dry-run");
    println!("  state_machine = {}", cfg.state_machine_arn);
    println!("  expression = {}", cfg.expression);
    println!("  limit = {}", cfg.limits.limit);
    println!("  strict_limit = {}", cfg.strict_limit);
    println!("  page_size = {}", cfg.limits.page_size);
    println!("  max_pages = {}", cfg.limits.max_pages);
    println!("  on_malformed = {:?}", cfg.on_malformed);
    if cfg.serve {
        println!("  serve = {}", cfg.bind);
    }
    if let Some(ref region) = cfg.region {
        println!("  region = {region}");
    }
    if let Some(ref profile) = cfg.profile {
        println!("  profile = {profile}");
    }
}
