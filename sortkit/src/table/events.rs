//! Event handling for Table.

use domlet::{Event, LayoutResult, ScrollSignal, closest, hit_test_path};

use super::config::SortStrategy;
use super::cursor::LoadOutcome;
use super::render::HEADER;
use super::state::Table;
use crate::error::Result;

impl Table {
    /// Handle a click on the header cell of `column_id`.
    ///
    /// The active column flips direction; any other sortable column starts
    /// at the configured default direction. Non-sortable and unknown
    /// columns are ignored.
    pub async fn on_header_click(&self, column_id: &str) -> Result<()> {
        let direction = self.with_inner(|inner| {
            let sortable = inner
                .columns
                .iter()
                .any(|c| c.id == column_id && c.sortable);
            if !sortable {
                return None;
            }
            Some(match &inner.sort {
                Some(sort) if sort.column_id == column_id => sort.direction.toggled(),
                _ => inner.config.default_direction,
            })
        })?;

        match direction {
            Some(direction) => self.sort(column_id, direction).await,
            None => {
                log::debug!("{} ignoring click on column '{}'", self.id(), column_id);
                Ok(())
            }
        }
    }

    /// Handle a scroll signal: load the next page once the table bottom is
    /// visible. Only remote tables load on scroll.
    pub async fn on_scroll(&self, signal: ScrollSignal) -> Result<LoadOutcome> {
        let remote = self.with_inner(|inner| inner.config.sort == SortStrategy::Remote)?;
        if !remote || !signal.bottom_visible() {
            return Ok(LoadOutcome::Skipped);
        }
        self.load_more().await
    }

    /// Handle a pointer press at `(x, y)`, sorting when it lands on a
    /// sortable header cell.
    pub async fn on_pointer_down(&self, x: i32, y: i32, layout: &LayoutResult) -> Result<()> {
        let column_id = self.with_inner(|inner| {
            let header = inner.surface.region(HEADER)?;
            let path = hit_test_path(layout, &header, x, y);
            closest(&header, &path, |element| {
                element.get_data("sortable").map(String::as_str) == Some("true")
            })
            .and_then(|cell| cell.get_data("id").cloned())
        })?;

        match column_id {
            Some(column_id) => self.on_header_click(&column_id).await,
            None => Ok(()),
        }
    }

    /// Dispatch a surface event.
    pub async fn handle_event(&self, event: &Event, layout: &LayoutResult) -> Result<()> {
        match event {
            Event::PointerDown { x, y, .. } => self.on_pointer_down(*x, *y, layout).await,
            Event::Scroll(signal) => self.on_scroll(*signal).await.map(|_| ()),
            _ => Ok(()),
        }
    }
}
