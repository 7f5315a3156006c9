// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::{RawConfigFile, RunConfig};
use crate::errors::{Result, SfnviewError};

/// Load a configuration file from a given path.
///
/// This only performs TOML deserialization; validation happens when the
/// merged result is turned into a [`RunConfig`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Config file read when `--config` is not given, if it exists.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Sfnview.toml")
}

/// Like [`load_from_path`], with any failure reported as a `ConfigError`
/// naming the file.
pub fn load_with_context(path: &Path) -> Result<RawConfigFile> {
    load_from_path(path)
        .map_err(|e| SfnviewError::ConfigError(format!("reading {}: {e}", path.display())))
}

/// Build the run configuration from CLI arguments.
///
/// Precedence: CLI flag, then config file, then built-in default.
///
/// - An explicit `--config` path must exist.
/// - Otherwise [`default_config_path`] is read when present.
pub fn resolve(args: &CliArgs) -> Result<RunConfig> {
    resolve_with_default(args, &default_config_path())
}

/// [`resolve`] with another file standing in for [`default_config_path`].
pub fn resolve_with_default(args: &CliArgs, default_path: &Path) -> Result<RunConfig> {
    let mut raw = match &args.config {
        Some(path) => load_with_context(path)?,
        None if default_path.is_file() => {
            debug!(path = %default_path.display(), "using default config file");
            load_with_context(default_path)?
        }
        None => RawConfigFile::default(),
    };

    apply_cli_overrides(&mut raw, args);
    RunConfig::try_from(raw)
}

/// Overlay the flags that were given on the command line.
pub fn apply_cli_overrides(raw: &mut RawConfigFile, args: &CliArgs) {
    if let Some(arn) = &args.arn {
        raw.listing.arn = Some(arn.clone());
    }
    if let Some(limit) = args.limit {
        raw.listing.limit = Some(limit);
    }
    if let Some(page_size) = args.page_size {
        raw.listing.page_size = Some(page_size);
    }
    if let Some(max_pages) = args.max_pages {
        raw.listing.max_pages = Some(max_pages);
    }
    if args.strict_limit {
        raw.listing.strict_limit = Some(true);
    }
    if let Some(expression) = &args.expression {
        raw.query.expression = Some(expression.clone());
    }
    if let Some(policy) = args.on_malformed {
        raw.query.on_malformed = Some(policy);
    }
    if args.serve {
        raw.serve.enabled = Some(true);
    }
    if let Some(bind) = &args.bind {
        raw.serve.bind = Some(bind.clone());
    }
    if let Some(region) = &args.region {
        raw.aws.region = Some(region.clone());
    }
    if let Some(profile) = &args.profile {
        raw.aws.profile = Some(profile.clone());
    }
}
