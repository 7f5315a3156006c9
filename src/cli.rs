// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Most flags are optional so that unset ones can fall back to the config
//! file; the documented defaults are applied in [`crate::config`].

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::MalformedInputPolicy;

/// Command-line arguments for `sfnview`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "sfnview",
    version,
    about = "List Step Functions executions and tabulate fields from their input.",
    long_about = None
)]
pub struct CliArgs {
    /// State machine ARN.
    #[arg(long, value_name = "ARN")]
    pub arn: Option<String>,

    /// Approximate number of executions to fetch [default: 100].
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// JMESPath expression applied to each execution input
    /// [default: "{ id: detail.id, type: detail.type }"].
    #[arg(long, value_name = "EXPR")]
    pub expression: Option<String>,

    /// Serve the collected rows in a web UI once the listing is done.
    #[arg(long)]
    pub serve: bool,

    /// Web UI bind address [default: 127.0.0.1:8080].
    #[arg(long, value_name = "HOST:PORT")]
    pub bind: Option<String>,

    /// Executions per listing call, 1-1000 [default: 100].
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Maximum number of listing calls [default: 3].
    #[arg(long, value_name = "N")]
    pub max_pages: Option<usize>,

    /// Emit exactly the first `--limit` executions instead of whole pages.
    #[arg(long)]
    pub strict_limit: bool,

    /// What to do when an execution input is not valid JSON [default: empty].
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_malformed: Option<MalformedInputPolicy>,

    /// AWS region (overrides the shared config).
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// AWS shared config profile.
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Path to a TOML config file.
    ///
    /// Default: `Sfnview.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SFNVIEW_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the configuration, but make no remote calls.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
