//! Column definitions.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use domlet::Element;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::sort::{compare_numbers, compare_text};

/// Custom comparator for a column's values.
pub type SortFn = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

/// Custom cell renderer for a column's values.
pub type CellRenderer = Arc<dyn Fn(&Value) -> Element + Send + Sync>;

/// How a column's values are ordered when no custom comparator is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    /// Collated, case-significant string order.
    #[default]
    String,
    /// Numeric order.
    Number,
    /// Ordered by the column's comparator.
    Custom,
}

/// Column configuration.
///
/// # Examples
///
/// ```
/// use sortkit::table::{Column, SortType};
///
/// let columns = vec![
///     Column::new("title", "Name").sortable(),
///     Column::new("price", "Price").sortable().sort_type(SortType::Number),
///     Column::new("images", "Image"),
/// ];
/// assert!(columns[1].sortable);
/// ```
#[derive(Clone)]
pub struct Column {
    /// Key of the value in each row; unique within a table.
    pub id: String,
    /// Header text.
    pub title: String,
    pub sortable: bool,
    pub sort_type: SortType,
    sort_function: Option<SortFn>,
    renderer: Option<CellRenderer>,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sortable: false,
            sort_type: SortType::String,
            sort_function: None,
            renderer: None,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn sort_type(mut self, sort_type: SortType) -> Self {
        self.sort_type = sort_type;
        self
    }

    /// Order values with `compare`. Implies [`SortType::Custom`].
    pub fn sort_by(
        mut self,
        compare: impl Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.sort_type = SortType::Custom;
        self.sort_function = Some(Arc::new(compare));
        self
    }

    /// Render cells with `render` instead of the plain text cell.
    pub fn render_with(mut self, render: impl Fn(&Value) -> Element + Send + Sync + 'static) -> Self {
        self.renderer = Some(Arc::new(render));
        self
    }

    /// Compare two values of this column in ascending order.
    ///
    /// A custom comparator wins over the sort type. Missing values are
    /// treated as `null`.
    pub fn compare(&self, a: Option<&Value>, b: Option<&Value>) -> Ordering {
        if let Some(compare) = &self.sort_function {
            return compare(a.unwrap_or(&Value::Null), b.unwrap_or(&Value::Null));
        }
        match self.sort_type {
            SortType::Number => compare_numbers(a, b),
            SortType::String | SortType::Custom => compare_text(a, b),
        }
    }

    /// Render one cell.
    pub fn render_cell(&self, value: Option<&Value>) -> Element {
        let value = value.unwrap_or(&Value::Null);
        match &self.renderer {
            Some(render) => render(value),
            None => Element::div()
                .class("sortable-table__cell")
                .child(Element::text(value_text(value))),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("sort_type", &self.sort_type)
            .field("custom_sort", &self.sort_function.is_some())
            .field("custom_renderer", &self.renderer.is_some())
            .finish()
    }
}

/// Display text of a JSON value: strings verbatim, `null` empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
