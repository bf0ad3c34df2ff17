//! Headless UI widgets rendering into a [`domlet`] surface.
//!
//! The centrepiece is [`table::Table`], a sortable table that resolves sorts
//! in memory or through its [`source::DataSource`] and loads further pages on
//! scroll, and [`list::SortableList`], a drag-and-drop reorderable list. The
//! remaining widgets are smaller: a range slider, a column chart, a tooltip,
//! toast notifications, a product form with a sortable image list and a
//! dashboard composing charts with a table.

pub mod chart;
pub mod collation;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod list;
pub mod notification;
pub mod registry;
pub mod slider;
pub mod source;
pub mod table;
pub mod tooltip;
pub mod utils;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::chart::{ChartConfig, ChartSource, ColumnChart};
    pub use crate::dashboard::{Dashboard, DashboardSources, DashboardUpdate};
    pub use crate::error::{Error, Result};
    pub use crate::form::{FormEvent, FormField, ProductData, ProductForm, ProductStore};
    pub use crate::list::{ItemId, ListItem, SortableList};
    pub use crate::notification::{Notification, NotificationCenter, NotificationConfig};
    pub use crate::registry::{Destroy, Singleton};
    pub use crate::slider::{RangeSelect, RangeSlider, SliderConfig};
    pub use crate::source::{DataSource, FetchError, MemorySource, PageRequest, Row};
    pub use crate::table::{
        Column, Direction, LoadOutcome, LoadState, SortState, SortStrategy, SortType, Table,
        TableConfig,
    };
    pub use crate::tooltip::{Tooltip, TooltipConfig};
}
