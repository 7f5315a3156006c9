// src/logging.rs

//! Logging setup for `sfnview` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the filter:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `SFNVIEW_LOG` environment variable: a level name ("info", "debug"),
//!    or full `EnvFilter` directives ("sfnview=debug,aws_smithy_runtime=trace")
//! 3. default to `info`
//!
//! A plain level applies to `sfnview` itself. The AWS SDK, HTTP stack and
//! actix stay at `warn` unless directives name them explicitly.
//!
//! Logs are sent to STDERR so that stdout carries only the table.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable read when `--log-level` is not given.
pub const LOG_ENV: &str = "SFNVIEW_LOG";

/// Dependency targets clamped to `warn` under a plain level.
const NOISY_TARGETS: &[&str] = &[
    "aws_config",
    "aws_smithy_runtime",
    "aws_smithy_runtime_api",
    "aws_smithy_http",
    "aws_sdk_sfn",
    "hyper",
    "hyper_util",
    "h2",
    "rustls",
    "actix_server",
    "actix_web",
    "actix_http",
];

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV).ok();
    let directives = filter_directives(cli_level, env_value.as_deref());
    let filter = EnvFilter::try_new(&directives)
        .map_err(|e| anyhow::anyhow!("invalid {LOG_ENV} filter {directives:?}: {e}"))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    Ok(())
}

/// Filter directives for the given flag and `SFNVIEW_LOG` value.
pub fn filter_directives(cli_level: Option<LogLevel>, env_value: Option<&str>) -> String {
    if let Some(lvl) = cli_level {
        return level_directives(level_from_log_level(lvl));
    }

    match env_value.map(str::trim).filter(|s| !s.is_empty()) {
        None => level_directives(Level::INFO),
        Some(value) => match parse_level_str(value) {
            Some(level) => level_directives(level),
            None => value.to_string(),
        },
    }
}

fn level_directives(level: Level) -> String {
    let own = level.as_str().to_lowercase();
    let noisy = if level == Level::ERROR { "error" } else { "warn" };

    let mut directives = vec![own.clone()];
    directives.extend(NOISY_TARGETS.iter().map(|t| format!("{t}={noisy}")));
    directives.push(format!("sfnview={own}"));
    directives.join(",")
}

fn level_from_log_level(lvl: LogLevel) -> Level {
    match lvl {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}

/// Parse a level name as accepted by `SFNVIEW_LOG`.
pub fn parse_level_str(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
