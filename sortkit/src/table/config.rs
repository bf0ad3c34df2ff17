//! Table configuration.

use super::sort::{Direction, SortState};

/// Where sort changes are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortStrategy {
    /// Re-order the loaded rows in memory; never re-fetch for sorting.
    Local,
    /// Ask the data source for a freshly sorted first page.
    #[default]
    Remote,
}

/// How rows are requested from the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    /// Pages of `step` rows, more loaded on scroll.
    Paged { step: usize },
    /// A single request for everything.
    Unpaginated,
}

impl Default for Paging {
    fn default() -> Self {
        Self::Paged {
            step: DEFAULT_STEP,
        }
    }
}

/// Default page size.
pub const DEFAULT_STEP: usize = 20;

/// Table configuration.
///
/// # Example
///
/// ```
/// use sortkit::table::{SortState, TableConfig};
///
/// let config = TableConfig::remote(30)
///     .with_initial_sort(SortState::desc("quantity"))
///     .with_row_link_base("/products");
/// assert_eq!(config.step(), Some(30));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    /// Sort resolution strategy.
    pub sort: SortStrategy,

    /// Paging strategy for data-source requests.
    pub paging: Paging,

    /// Sort applied on first render.
    pub initial_sort: Option<SortState>,

    /// Direction used when a header click activates a new column.
    ///
    /// Default: ascending
    pub default_direction: Direction,

    /// Rows become links to `{row_link_base}/{id}` when set.
    pub row_link_base: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            sort: SortStrategy::default(),
            paging: Paging::default(),
            initial_sort: None,
            default_direction: Direction::Asc,
            row_link_base: None,
        }
    }
}

impl TableConfig {
    /// Creates a config with default values (remote sort, pages of 20).
    pub fn new() -> Self {
        Self::default()
    }

    /// Local sort over whatever rows are loaded.
    pub fn local() -> Self {
        Self {
            sort: SortStrategy::Local,
            ..Default::default()
        }
    }

    /// Remote sort with pages of `step` rows.
    pub fn remote(step: usize) -> Self {
        Self {
            sort: SortStrategy::Remote,
            paging: Paging::Paged { step },
            ..Default::default()
        }
    }

    pub fn with_sort_strategy(mut self, sort: SortStrategy) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_paging(mut self, paging: Paging) -> Self {
        self.paging = paging;
        self
    }

    pub fn with_initial_sort(mut self, sort: SortState) -> Self {
        self.initial_sort = Some(sort);
        self
    }

    pub fn with_default_direction(mut self, direction: Direction) -> Self {
        self.default_direction = direction;
        self
    }

    pub fn with_row_link_base(mut self, base: impl Into<String>) -> Self {
        self.row_link_base = Some(base.into());
        self
    }

    /// Page size, if paged.
    pub fn step(&self) -> Option<usize> {
        match self.paging {
            Paging::Paged { step } => Some(step),
            Paging::Unpaginated => None,
        }
    }

    pub fn is_local(&self) -> bool {
        self.sort == SortStrategy::Local
    }
}
