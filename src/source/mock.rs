// src/source/mock.rs

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use crate::errors::{Result, SfnviewError};

use super::backend::ExecutionBackend;
use super::{ExecutionDetail, ExecutionPage, ExecutionSummary, PageRequest};

/// A remote call observed by [`MockBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    List { page_size: usize, next_token: Option<String> },
    Describe { execution_arn: String },
}

#[derive(Debug, Default)]
struct MockState {
    executions: Vec<ExecutionSummary>,
    inputs: HashMap<String, Option<String>>,
    failing_describes: HashSet<String>,
    fail_list_at_page: Option<usize>,
    max_page_len: Option<usize>,
    calls: Vec<MockCall>,
}

/// In-memory backend serving a fixed list of executions.
///
/// Pages are cut from the list according to the requested page size; the
/// continuation token is the offset of the next page. Clones share state, so
/// a test can keep one handle to inspect [`MockBackend::calls`] after the
/// pipeline consumed the other.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an execution with the given raw input payload.
    pub fn add_execution(&self, summary: ExecutionSummary, input: Option<&str>) {
        let mut state = self.state.lock().unwrap();
        state
            .inputs
            .insert(summary.execution_arn.clone(), input.map(str::to_string));
        state.executions.push(summary);
    }

    /// Make `DescribeExecution` fail for this execution.
    pub fn fail_describe(&self, execution_arn: &str) {
        let mut state = self.state.lock().unwrap();
        state.failing_describes.insert(execution_arn.to_string());
    }

    /// Make the `page`-th listing call (0-based) fail.
    pub fn fail_list_at_page(&self, page: usize) {
        let mut state = self.state.lock().unwrap();
        state.fail_list_at_page = Some(page);
    }

    /// Return at most `len` executions per page, whatever the requested
    /// page size, as the listing API may do.
    pub fn cap_page_len(&self, len: usize) {
        let mut state = self.state.lock().unwrap();
        state.max_page_len = Some(len);
    }

    /// All remote calls made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MockCall::List { .. }))
            .count()
    }

    pub fn describe_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MockCall::Describe { .. }))
            .count()
    }

    fn next_page(&self, request: PageRequest) -> Result<ExecutionPage> {
        let mut state = self.state.lock().unwrap();

        let page_index = state
            .calls
            .iter()
            .filter(|c| matches!(c, MockCall::List { .. }))
            .count();
        state.calls.push(MockCall::List {
            page_size: request.page_size,
            next_token: request.next_token.clone(),
        });

        if state.fail_list_at_page == Some(page_index) {
            return Err(SfnviewError::RemoteError(format!(
                "ListExecutions failed on page {page_index}"
            )));
        }

        let offset = match request.next_token.as_deref() {
            Some(token) => token.parse::<usize>().map_err(|_| {
                SfnviewError::RemoteError(format!("invalid pagination token: {token}"))
            })?,
            None => 0,
        };

        let page_len = match state.max_page_len {
            Some(cap) => request.page_size.min(cap),
            None => request.page_size,
        };
        let end = (offset + page_len.max(1)).min(state.executions.len());
        let executions = state.executions.get(offset..end).unwrap_or_default().to_vec();
        let next_token = (end < state.executions.len()).then(|| end.to_string());

        Ok(ExecutionPage {
            executions,
            next_token,
        })
    }

    fn describe(&self, execution_arn: String) -> Result<ExecutionDetail> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall::Describe {
            execution_arn: execution_arn.clone(),
        });

        if state.failing_describes.contains(&execution_arn) {
            return Err(SfnviewError::RemoteError(format!(
                "DescribeExecution {execution_arn} failed"
            )));
        }

        match state.inputs.get(&execution_arn) {
            Some(input) => Ok(ExecutionDetail {
                input: input.clone(),
                execution_arn,
            }),
            None => Err(SfnviewError::RemoteError(format!(
                "ExecutionDoesNotExist: {execution_arn}"
            ))),
        }
    }
}

impl ExecutionBackend for MockBackend {
    fn list_executions(
        &mut self,
        request: PageRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionPage>> + Send + '_>> {
        let result = self.next_page(request);
        Box::pin(async move { result })
    }

    fn describe_execution(
        &mut self,
        execution_arn: String,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionDetail>> + Send + '_>> {
        let result = self.describe(execution_arn);
        Box::pin(async move { result })
    }
}
