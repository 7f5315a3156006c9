// src/config/validate.rs

use std::net::SocketAddr;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::model::{
    DEFAULT_ARN, DEFAULT_BIND, DEFAULT_EXPRESSION, DEFAULT_LIMIT, DEFAULT_MAX_PAGES,
    DEFAULT_PAGE_SIZE, RawConfigFile, RunConfig,
};
use crate::errors::{Result, SfnviewError};
use crate::source::PageLimits;

/// Upper bound the listing API accepts for `maxResults`.
pub const MAX_PAGE_SIZE: usize = 1000;

/// State machine ARN, optionally qualified with a version or alias.
static STATE_MACHINE_ARN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^arn:aws[a-z-]*:states:[a-z0-9-]+:\d{12}:stateMachine:[A-Za-z0-9_.-]{1,80}(:[A-Za-z0-9_.-]+)?$",
    )
    .expect("state machine ARN pattern is valid")
});

impl TryFrom<RawConfigFile> for RunConfig {
    type Error = SfnviewError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let state_machine_arn = raw.listing.arn.unwrap_or_else(|| DEFAULT_ARN.to_string());
        validate_arn(&state_machine_arn)?;

        let strict_limit = raw.listing.strict_limit.unwrap_or(false);
        let limits = PageLimits {
            page_size: raw.listing.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            max_pages: raw.listing.max_pages.unwrap_or(DEFAULT_MAX_PAGES),
            limit: raw.listing.limit.unwrap_or(DEFAULT_LIMIT),
            strict: strict_limit,
        };
        validate_limits(&limits)?;

        let expression = raw
            .query
            .expression
            .unwrap_or_else(|| DEFAULT_EXPRESSION.to_string());
        if expression.trim().is_empty() {
            return Err(SfnviewError::ConfigError(
                "expression must not be empty".to_string(),
            ));
        }

        let bind = parse_bind(raw.serve.bind.as_deref().unwrap_or(DEFAULT_BIND))?;

        Ok(RunConfig {
            state_machine_arn,
            limits,
            strict_limit,
            expression,
            on_malformed: raw.query.on_malformed.unwrap_or_default(),
            serve: raw.serve.enabled.unwrap_or(false),
            bind,
            region: raw.aws.region,
            profile: raw.aws.profile,
        })
    }
}

/// Check that `arn` names a Step Functions state machine.
pub fn validate_arn(arn: &str) -> Result<()> {
    if arn == DEFAULT_ARN {
        return Err(SfnviewError::ConfigError(
            "no state machine given; pass --arn or set [listing].arn".to_string(),
        ));
    }
    if !STATE_MACHINE_ARN.is_match(arn) {
        return Err(SfnviewError::ConfigError(format!(
            "'{arn}' is not a state machine ARN \
             (expected arn:aws:states:<region>:<account-id>:stateMachine:<name>)"
        )));
    }
    Ok(())
}

fn validate_limits(limits: &PageLimits) -> Result<()> {
    if limits.page_size == 0 || limits.page_size > MAX_PAGE_SIZE {
        return Err(SfnviewError::ConfigError(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE} (got {})",
            limits.page_size
        )));
    }
    if limits.max_pages == 0 {
        return Err(SfnviewError::ConfigError(
            "max_pages must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn parse_bind(bind: &str) -> Result<SocketAddr> {
    bind.trim().parse::<SocketAddr>().map_err(|e| {
        SfnviewError::ConfigError(format!("invalid bind address '{bind}': {e}"))
    })
}
