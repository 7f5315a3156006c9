// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SfnviewError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Remote API error: {0}")]
    RemoteError(String),

    #[error("Query error: {0}")]
    QueryError(#[from] QueryError),

    #[error("Malformed input for execution {execution}: {source}")]
    MalformedInput {
        execution: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failures raised while compiling or evaluating the query expression.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("invalid expression `{expression}`: {reason}")]
    Invalid { expression: String, reason: String },

    #[error("evaluation of `{expression}` failed: {reason}")]
    Evaluation { expression: String, reason: String },

    #[error("expression `{expression}` must produce an object, got {found}")]
    UnexpectedShape {
        expression: String,
        found: &'static str,
    },
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SfnviewError>;
