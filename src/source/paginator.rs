// src/source/paginator.rs

use tracing::{debug, info};

use crate::errors::Result;

use super::backend::ExecutionBackend;
use super::{ExecutionSummary, PageRequest};

/// Ceilings applied while walking the listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Executions requested per listing call.
    pub page_size: usize,
    /// Absolute cap on listing calls, independent of `limit`.
    pub max_pages: usize,
    /// Approximate number of executions the user asked for.
    ///
    /// Checked before each listing call as `pages_fetched * page_size > limit`,
    /// so up to one extra page may be fetched.
    pub limit: usize,
    /// Exact limit. Only `max_pages` caps the listing; the consumer stops
    /// once `limit` rows are out.
    pub strict: bool,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            page_size: 100,
            max_pages: 3,
            limit: 100,
            strict: false,
        }
    }
}

impl PageLimits {
    /// Whether another page may be requested after `pages_fetched` pages.
    pub fn allows_another_page(&self, pages_fetched: usize) -> bool {
        if pages_fetched >= self.max_pages {
            return false;
        }
        self.strict || pages_fetched.saturating_mul(self.page_size) <= self.limit
    }
}

/// Walks the paginated listing of one state machine.
///
/// Each call to [`ExecutionSource::next_page`] issues at most one listing
/// call. Once the API reports no continuation token, or one of the
/// [`PageLimits`] ceilings is reached, it returns `None` without touching the
/// backend again.
pub struct ExecutionSource<B: ExecutionBackend> {
    backend: B,
    state_machine_arn: String,
    limits: PageLimits,
    next_token: Option<String>,
    pages_fetched: usize,
    exhausted: bool,
}

impl<B: ExecutionBackend> ExecutionSource<B> {
    pub fn new(backend: B, state_machine_arn: impl Into<String>, limits: PageLimits) -> Self {
        Self {
            backend,
            state_machine_arn: state_machine_arn.into(),
            limits,
            next_token: None,
            pages_fetched: 0,
            exhausted: false,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Whether the API reported more pages after the last one fetched.
    pub fn has_more_pages(&self) -> bool {
        !self.exhausted
    }

    /// The underlying backend, for per-execution describe calls.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Fetch the next page, or `None` when the listing is done.
    pub async fn next_page(&mut self) -> Result<Option<Vec<ExecutionSummary>>> {
        if self.exhausted {
            debug!("no more pages reported by the listing API");
            return Ok(None);
        }
        if !self.limits.allows_another_page(self.pages_fetched) {
            info!(
                pages_fetched = self.pages_fetched,
                max_pages = self.limits.max_pages,
                limit = self.limits.limit,
                "page ceiling reached; stopping"
            );
            return Ok(None);
        }

        let request = PageRequest {
            state_machine_arn: self.state_machine_arn.clone(),
            page_size: self.limits.page_size,
            next_token: self.next_token.take(),
        };
        let page = self.backend.list_executions(request).await?;
        self.pages_fetched += 1;

        self.exhausted = !page.has_more();
        self.next_token = page.next_token;

        info!(
            page = self.pages_fetched,
            executions = page.executions.len(),
            more = !self.exhausted,
            "fetched execution page"
        );

        Ok(Some(page.executions))
    }
}
