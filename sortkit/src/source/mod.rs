//! Data sources the table pulls rows from.

mod memory;
mod row;

pub use memory::MemorySource;
pub use row::Row;

use std::collections::BTreeMap;
use std::ops::Range;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::table::SortState;

/// A request for one page of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Order the source should apply before slicing.
    pub sort: Option<SortState>,
    /// Rows `[start, end)` of the ordered result, or everything.
    pub range: Option<Range<usize>>,
    /// Extra query parameters (date filters and the like).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl PageRequest {
    /// Request every row.
    pub fn all(sort: Option<SortState>) -> Self {
        Self {
            sort,
            range: None,
            params: BTreeMap::new(),
        }
    }

    /// Request rows `[start, end)`.
    pub fn range(sort: Option<SortState>, range: Range<usize>) -> Self {
        Self {
            sort,
            range: Some(range),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Errors a data source can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never reached the server or the connection dropped.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with an error.
    #[error("HTTP {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },
}

impl FetchError {
    /// Creates a new network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a new server error.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }
}

/// Something that can answer page requests.
///
/// Implementations are free to hit the network; the table treats every call
/// as an opaque async boundary.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Row>, FetchError>;
}
