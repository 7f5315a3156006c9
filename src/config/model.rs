// src/config/model.rs

use std::net::SocketAddr;

use serde::Deserialize;

use crate::engine::RunOptions;
use crate::source::PageLimits;
use crate::types::MalformedInputPolicy;

pub const DEFAULT_ARN: &str =
    "arn:aws:states:us-east-1:<account-id>:stateMachine:<state-machine-name>";
pub const DEFAULT_LIMIT: usize = 100;
pub const DEFAULT_EXPRESSION: &str = "{ id: detail.id, type: detail.type }";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_MAX_PAGES: usize = 3;

/// Configuration as read from a TOML file, before CLI overrides and
/// validation.
///
/// ```toml
/// [listing]
/// arn = "arn:aws:states:eu-west-1:123456789012:stateMachine:orders"
/// limit = 250
/// page_size = 100
/// max_pages = 3
/// strict_limit = false
///
/// [query]
/// expression = "{ id: detail.id, type: detail.type }"
/// on_malformed = "empty"
///
/// [serve]
/// enabled = false
/// bind = "127.0.0.1:8080"
///
/// [aws]
/// region = "eu-west-1"
/// profile = "prod"
/// ```
///
/// Every field is optional; unset fields fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub listing: ListingSection,

    #[serde(default)]
    pub query: QuerySection,

    #[serde(default)]
    pub serve: ServeSection,

    #[serde(default)]
    pub aws: AwsSection,
}

/// `[listing]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListingSection {
    /// State machine ARN.
    pub arn: Option<String>,
    /// Approximate number of executions to fetch.
    pub limit: Option<usize>,
    /// Executions per listing call (1..=1000).
    pub page_size: Option<usize>,
    /// Hard cap on listing calls.
    pub max_pages: Option<usize>,
    /// Truncate output to exactly `limit` rows.
    pub strict_limit: Option<bool>,
}

/// `[query]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuerySection {
    /// JMESPath expression applied to each execution input.
    pub expression: Option<String>,
    pub on_malformed: Option<MalformedInputPolicy>,
}

/// `[serve]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServeSection {
    pub enabled: Option<bool>,
    pub bind: Option<String>,
}

/// `[aws]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwsSection {
    pub region: Option<String>,
    pub profile: Option<String>,
}

/// Validated configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub state_machine_arn: String,
    pub limits: PageLimits,
    pub strict_limit: bool,
    pub expression: String,
    pub on_malformed: MalformedInputPolicy,
    pub serve: bool,
    pub bind: SocketAddr,
    pub region: Option<String>,
    pub profile: Option<String>,
}

impl RunConfig {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            on_malformed: self.on_malformed,
            strict_limit: self.strict_limit.then_some(self.limits.limit),
        }
    }
}
