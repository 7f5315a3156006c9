// src/source/backend.rs

//! Pluggable execution backend abstraction.
//!
//! The pipeline talks to an `ExecutionBackend` instead of an SDK client.
//! This makes it easy to swap in a fake backend in tests while keeping the
//! production implementation in [`super::aws`].

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

use super::{ExecutionDetail, ExecutionPage, PageRequest};

/// Trait abstracting the remote workflow API.
///
/// Production code uses [`super::SfnBackend`]; tests can provide their own
/// implementation that serves canned pages.
pub trait ExecutionBackend: Send {
    /// Fetch one page of execution summaries.
    ///
    /// Failures must be reported as `SfnviewError::RemoteError`.
    fn list_executions(
        &mut self,
        request: PageRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionPage>> + Send + '_>>;

    /// Fetch the full record (including the input payload) of one execution.
    fn describe_execution(
        &mut self,
        execution_arn: String,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionDetail>> + Send + '_>>;
}
