// src/source/mod.rs

//! Execution retrieval layer.
//!
//! - [`backend`] defines the `ExecutionBackend` trait the pipeline talks to,
//!   which tests replace with a scripted fake.
//! - [`aws`] is the production backend over the Step Functions API.
//! - [`mock`] is an in-memory backend holding a fixed list of executions.
//! - [`paginator`] wraps a backend and enforces the page/limit ceilings.

use chrono::{DateTime, Utc};

use crate::types::ExecutionStatus;

pub mod aws;
pub mod backend;
pub mod mock;
pub mod paginator;

pub use aws::SfnBackend;
pub use backend::ExecutionBackend;
pub use mock::{MockBackend, MockCall};
pub use paginator::{ExecutionSource, PageLimits};

/// One entry of a `ListExecutions` page.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Opaque execution reference (the execution ARN).
    pub execution_arn: String,
    pub name: String,
    pub start_date: DateTime<Utc>,
    /// `None` while the execution is still running.
    pub stop_date: Option<DateTime<Utc>>,
    pub status: ExecutionStatus,
}

/// Full record of one execution, as far as the pipeline cares.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionDetail {
    pub execution_arn: String,
    /// Raw input payload. `None` when the API returned no input at all.
    pub input: Option<String>,
}

/// Parameters for a single listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub state_machine_arn: String,
    pub page_size: usize,
    pub next_token: Option<String>,
}

/// One page returned by the listing API.
#[derive(Debug, Clone, Default)]
pub struct ExecutionPage {
    pub executions: Vec<ExecutionSummary>,
    /// Continuation token; `None` means there are no more pages.
    pub next_token: Option<String>,
}

impl ExecutionPage {
    pub fn has_more(&self) -> bool {
        self.next_token.is_some()
    }
}
