//! Drag-and-drop reorderable list.
//!
//! Items carry a [`GRAB_HANDLE`] element to start a drag and optionally a
//! [`DELETE_HANDLE`] element to remove them:
//!
//! ```
//! use domlet::{Document, Element};
//! use sortkit::list::{GRAB_HANDLE, SortableList};
//!
//! let row = |text: &str| {
//!     Element::div()
//!         .child(Element::span().data(GRAB_HANDLE, ""))
//!         .child(Element::text(text))
//! };
//! let list = SortableList::new([row("first"), row("second")], Document::new());
//! assert_eq!(list.len(), 2);
//! ```

mod events;
mod item;
mod session;
mod state;
mod view;

pub use item::{ItemId, ListItem};
pub use session::DragSession;
pub use state::{ListId, SortableList};
pub use view::{
    DELETE_HANDLE, DRAGGING_CLASS, GRAB_HANDLE, ITEM_CLASS, LIST, ListEntry, ListView,
    PLACEHOLDER_CLASS, list_element,
};
