//! Element trees for table views.

use domlet::Element;

use super::view::{HeaderCell, RowView, TableView};

pub const HEADER: &str = "header";
pub const BODY: &str = "body";
pub const LOADING: &str = "loading";
pub const EMPTY_PLACEHOLDER: &str = "emptyPlaceholder";
pub const ERROR: &str = "error";

/// The full table tree: header, body and the status regions.
pub fn table_element(id: &str, view: &TableView) -> Element {
    Element::div()
        .id(id)
        .class("sortable-table")
        .child(
            Element::div()
                .region(HEADER)
                .class("sortable-table__header")
                .class("sortable-table__row")
                .children(header_elements(&view.header)),
        )
        .child(
            Element::div()
                .region(BODY)
                .class("sortable-table__body")
                .children(row_elements(&view.rows)),
        )
        .child(
            Element::div()
                .region(LOADING)
                .class("loading-line")
                .class("sortable-table__loading-line")
                .hidden(!view.loading),
        )
        .child(
            Element::div()
                .region(EMPTY_PLACEHOLDER)
                .class("sortable-table__empty-placeholder")
                .hidden(!view.empty)
                .child(Element::text("No products found")),
        )
        .child(error_element(view.error.as_deref()))
}

pub fn header_elements(cells: &[HeaderCell]) -> Vec<Element> {
    cells.iter().map(header_element).collect()
}

fn header_element(cell: &HeaderCell) -> Element {
    let mut element = Element::div()
        .class("sortable-table__cell")
        .data("id", cell.id.clone())
        .data("sortable", cell.sortable.to_string())
        .child(Element::text(cell.title.clone()));

    if let Some(order) = cell.order {
        element = element.data("order", order.as_str()).child(
            Element::span()
                .region("arrow")
                .class("sortable-table__sort-arrow")
                .child(Element::span().class("sort-arrow")),
        );
    }
    element
}

pub fn row_elements(rows: &[RowView]) -> Vec<Element> {
    rows.iter().map(row_element).collect()
}

fn row_element(row: &RowView) -> Element {
    let element = match &row.link {
        Some(link) => Element::link(link.clone()),
        None => Element::div(),
    };
    element
        .class("sortable-table__row")
        .children(row.cells.iter().cloned())
}

pub fn error_element(message: Option<&str>) -> Element {
    Element::div()
        .region(ERROR)
        .class("sortable-table__error")
        .hidden(message.is_none())
        .children(message.map(Element::text))
}
