//! Event handling for SortableList.

use domlet::{Element, Event, LayoutResult, Point, closest, hit_test_path};

use super::item::ItemId;
use super::state::SortableList;
use super::view::{DELETE_HANDLE, GRAB_HANDLE, ITEM_CLASS, LIST};
use crate::error::Result;

/// What a pointer press landed on.
enum Target {
    Grab(ItemId),
    Delete(ItemId),
}

impl SortableList {
    /// Handle a pointer press: a grab handle starts a drag, a delete handle
    /// removes its item. Presses elsewhere are ignored.
    pub fn on_pointer_down(&self, x: i32, y: i32, layout: &LayoutResult) -> Result<()> {
        let target = self.with_inner(|inner| {
            let root = inner.surface.region(LIST)?;
            let path = hit_test_path(layout, &root, x, y);
            let item = closest(&root, &path, |e| e.has_class(ITEM_CLASS))
                .and_then(|e| ItemId::parse(&e.id))?;

            if closest(&root, &path, |e| has_data(e, GRAB_HANDLE)).is_some() {
                Some(Target::Grab(item))
            } else if closest(&root, &path, |e| has_data(e, DELETE_HANDLE)).is_some() {
                Some(Target::Delete(item))
            } else {
                None
            }
        })?;

        match target {
            Some(Target::Grab(id)) => self.grab(id, Point::new(x, y), layout),
            Some(Target::Delete(id)) => self.remove_item(id).map(|_| ()),
            None => Ok(()),
        }
    }

    pub fn on_pointer_move(&self, x: i32, y: i32, layout: &LayoutResult) -> Result<()> {
        if !self.is_dragging() {
            return Ok(());
        }
        self.drag_to(Point::new(x, y), layout)
    }

    pub fn on_pointer_up(&self) -> Result<()> {
        self.release()
    }

    /// Dispatch a surface event.
    pub fn handle_event(&self, event: &Event, layout: &LayoutResult) -> Result<()> {
        match event {
            Event::PointerDown { x, y, .. } => self.on_pointer_down(*x, *y, layout),
            Event::PointerMove { x, y } => self.on_pointer_move(*x, *y, layout),
            Event::PointerUp { .. } => self.on_pointer_up(),
            _ => Ok(()),
        }
    }
}

fn has_data(element: &Element, key: &str) -> bool {
    element.get_data(key).is_some()
}
