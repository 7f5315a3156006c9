// src/config/mod.rs

//! Configuration loading and validation for sfnview.
//!
//! Responsibilities:
//! - Define the TOML-backed data model and the validated `RunConfig`
//!   (`model.rs`).
//! - Load a config file and overlay CLI flags (`loader.rs`).
//! - Validate ARN, page ceilings and bind address (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    apply_cli_overrides, default_config_path, load_from_path, load_with_context, resolve,
    resolve_with_default,
};
pub use model::{
    AwsSection, ListingSection, QuerySection, RawConfigFile, RunConfig, ServeSection,
};
pub use validate::validate_arn;
