//! Sortable table with incremental loading.
//!
//! A [`Table`] keeps a buffer of rows, the active [`SortState`] and a
//! pagination [`Cursor`]. Sorting is resolved in memory or delegated to the
//! [`DataSource`](crate::source::DataSource) depending on the configured
//! [`SortStrategy`]; remote tables load further pages as the user scrolls.

mod column;
mod config;
mod cursor;
mod events;
pub mod render;
mod sort;
mod state;
mod view;

pub use column::{CellRenderer, Column, SortFn, SortType, value_text};
pub use config::{DEFAULT_STEP, Paging, SortStrategy, TableConfig};
pub use cursor::{Cursor, LoadOutcome, LoadState};
pub use sort::{Direction, SortState, natural_order, sort_rows};
pub use state::{Table, TableId};
pub use view::{HeaderCell, RowView, TableView, header_cells};
