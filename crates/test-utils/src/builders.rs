#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use sfnview::config::{RawConfigFile, RunConfig};
use sfnview::source::{ExecutionSummary, MockBackend};
use sfnview::types::{ExecutionStatus, MalformedInputPolicy};

pub const TEST_ARN: &str = "arn:aws:states:us-east-1:123456789012:stateMachine:orders";

/// Builder for `ExecutionSummary`.
pub struct SummaryBuilder {
    summary: ExecutionSummary,
}

impl SummaryBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            summary: ExecutionSummary {
                execution_arn: format!(
                    "arn:aws:states:us-east-1:123456789012:execution:orders:{name}"
                ),
                name: name.to_string(),
                start_date: utc(2024, 3, 1, 10, 0, 0),
                stop_date: Some(utc(2024, 3, 1, 10, 0, 5)),
                status: ExecutionStatus::Succeeded,
            },
        }
    }

    pub fn status(mut self, status: ExecutionStatus) -> Self {
        self.summary.status = status;
        self
    }

    pub fn started(mut self, ts: DateTime<Utc>) -> Self {
        self.summary.start_date = ts;
        self
    }

    pub fn stopped(mut self, ts: DateTime<Utc>) -> Self {
        self.summary.stop_date = Some(ts);
        self
    }

    /// Still running: no stop date.
    pub fn running(mut self) -> Self {
        self.summary.status = ExecutionStatus::Running;
        self.summary.stop_date = None;
        self
    }

    pub fn build(self) -> ExecutionSummary {
        self.summary
    }
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("valid test timestamp")
}

/// Input payload in the shape the default expression expects.
pub fn detail_input(id: &str, kind: &str) -> String {
    format!(r#"{{"detail":{{"id":"{id}","type":"{kind}"}}}}"#)
}

/// Mock backend holding `count` succeeded executions `E1..=E<count>`, each
/// with a well-formed input.
pub fn backend_with_executions(count: usize) -> MockBackend {
    let backend = MockBackend::new();
    for i in 1..=count {
        let name = format!("E{i}");
        backend.add_execution(
            SummaryBuilder::new(&name).build(),
            Some(&detail_input(&format!("x{i}"), "Created")),
        );
    }
    backend
}

/// Builder for a validated `RunConfig`.
pub struct RunConfigBuilder {
    raw: RawConfigFile,
}

impl RunConfigBuilder {
    pub fn new() -> Self {
        let mut raw = RawConfigFile::default();
        raw.listing.arn = Some(TEST_ARN.to_string());
        Self { raw }
    }

    pub fn expression(mut self, expression: &str) -> Self {
        self.raw.query.expression = Some(expression.to_string());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.raw.listing.limit = Some(limit);
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.raw.listing.page_size = Some(page_size);
        self
    }

    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.raw.listing.max_pages = Some(max_pages);
        self
    }

    pub fn strict_limit(mut self, val: bool) -> Self {
        self.raw.listing.strict_limit = Some(val);
        self
    }

    pub fn on_malformed(mut self, policy: MalformedInputPolicy) -> Self {
        self.raw.query.on_malformed = Some(policy);
        self
    }

    pub fn build(self) -> RunConfig {
        RunConfig::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}

impl Default for RunConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
