//! Drag sessions.

use domlet::{Point, PointerCapture, Rect};

use super::item::ItemId;

/// An active grab. Exists from pointer-down on a grab handle until release.
///
/// The session owns the pointer capture; dropping it (release, cancel,
/// removal of the dragged item, destroy) ends the capture.
#[derive(Debug)]
pub struct DragSession {
    item: ItemId,
    /// Grab point relative to the item's top-left corner.
    offset: Point,
    /// Current top-left corner of the detached item.
    origin: Point,
    /// Slot of the placeholder among the items that are not dragged.
    placeholder: usize,
    width: i32,
    height: i32,
    _capture: PointerCapture,
}

impl DragSession {
    /// Start dragging `item`, whose box is `rect`, grabbed at `pointer`.
    pub fn start(
        item: ItemId,
        pointer: Point,
        rect: Rect,
        slot: usize,
        capture: PointerCapture,
    ) -> Self {
        Self {
            item,
            offset: pointer - rect.origin(),
            origin: rect.origin(),
            placeholder: slot,
            width: rect.width,
            height: rect.height,
            _capture: capture,
        }
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn placeholder(&self) -> usize {
        self.placeholder
    }

    /// Width and height of the dragged item when grabbed.
    pub fn footprint(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Track the pointer; the grab offset stays fixed.
    pub(super) fn move_to(&mut self, pointer: Point) {
        self.origin = pointer - self.offset;
    }

    pub(super) fn set_placeholder(&mut self, slot: usize) {
        self.placeholder = slot;
    }
}
