use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use super::{DataSource, FetchError, PageRequest, Row};
use crate::table::natural_order;

#[derive(Debug, Default)]
struct MemoryInner {
    rows: Vec<Row>,
    requests: Vec<PageRequest>,
    fail_next: Option<FetchError>,
}

/// A data source serving rows from memory.
///
/// Rows are sorted with [`natural_order`] (numbers numerically, everything
/// else with the string collation) and then sliced by the requested range,
/// like a REST backend honouring `_sort`, `_order`, `_start` and `_end`.
/// Every request is recorded. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    inner: Arc<RwLock<MemoryInner>>,
    latency: Option<Duration>,
}

impl MemorySource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryInner {
                rows,
                ..Default::default()
            })),
            latency: None,
        }
    }

    /// Delay every response by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Fail the next request with `error`.
    pub fn fail_next(&self, error: FetchError) {
        if let Ok(mut guard) = self.inner.write() {
            guard.fail_next = Some(error);
        }
    }

    /// Replace the served rows.
    pub fn set_rows(&self, rows: Vec<Row>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rows = rows;
        }
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<PageRequest> {
        self.inner
            .read()
            .map(|g| g.requests.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.inner.read().map(|g| g.requests.len()).unwrap_or(0)
    }

    fn answer(&self, request: &PageRequest) -> Result<Vec<Row>, FetchError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| FetchError::server(500, "source state poisoned"))?;
        guard.requests.push(request.clone());

        if let Some(error) = guard.fail_next.take() {
            return Err(error);
        }

        let mut rows = guard.rows.clone();
        if let Some(sort) = &request.sort {
            rows.sort_by(|a, b| {
                sort.direction
                    .apply(natural_order(a.get(&sort.column_id), b.get(&sort.column_id)))
            });
        }

        Ok(match &request.range {
            Some(range) => {
                let start = range.start.min(rows.len());
                let end = range.end.min(rows.len()).max(start);
                rows[start..end].to_vec()
            }
            None => rows,
        })
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Row>, FetchError> {
        log::debug!("MemorySource request: {request:?}");
        // Record on arrival so callers can observe in-flight requests.
        let result = self.answer(request);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        result
    }
}
