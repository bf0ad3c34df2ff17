//! Pure view model for the table.

use domlet::Element;

use super::column::Column;
use super::cursor::LoadState;
use super::sort::{Direction, SortState};
use crate::source::Row;

/// One header cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub id: String,
    pub title: String,
    pub sortable: bool,
    /// Direction shown on the active sort column.
    pub order: Option<Direction>,
}

/// One body row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Link target, when the table links rows.
    pub link: Option<String>,
    pub cells: Vec<Element>,
}

impl RowView {
    pub fn compute(columns: &[Column], row: &Row, link_base: Option<&str>) -> Self {
        let link = link_base.and_then(|base| {
            row.id()
                .map(|id| format!("{}/{}", base.trim_end_matches('/'), id))
        });
        Self {
            link,
            cells: columns
                .iter()
                .map(|column| column.render_cell(row.get(&column.id)))
                .collect(),
        }
    }
}

/// Everything needed to draw the table, derived from its state.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub header: Vec<HeaderCell>,
    pub rows: Vec<RowView>,
    pub loading: bool,
    /// Show the empty placeholder.
    pub empty: bool,
    /// Message for the error region.
    pub error: Option<String>,
}

impl TableView {
    pub fn compute(
        columns: &[Column],
        rows: &[Row],
        sort: Option<&SortState>,
        load_state: &LoadState,
        link_base: Option<&str>,
    ) -> Self {
        let loading = load_state.is_loading();
        Self {
            header: header_cells(columns, sort),
            rows: rows
                .iter()
                .map(|row| RowView::compute(columns, row, link_base))
                .collect(),
            loading,
            empty: rows.is_empty() && !loading,
            error: load_state.as_error().map(|e| e.to_string()),
        }
    }
}

pub fn header_cells(columns: &[Column], sort: Option<&SortState>) -> Vec<HeaderCell> {
    columns
        .iter()
        .map(|column| HeaderCell {
            id: column.id.clone(),
            title: column.title.clone(),
            sortable: column.sortable,
            order: sort
                .filter(|s| s.column_id == column.id)
                .map(|s| s.direction),
        })
        .collect()
}
