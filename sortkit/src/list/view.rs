//! Pure view model and element trees for the sortable list.

use domlet::Element;

use super::item::ListItem;
use super::session::DragSession;

pub const LIST: &str = "list";
pub const GRAB_HANDLE: &str = "grab-handle";
pub const DELETE_HANDLE: &str = "delete-handle";

pub const ITEM_CLASS: &str = "sortable-list__item";
pub const DRAGGING_CLASS: &str = "sortable-list__item_dragging";
pub const PLACEHOLDER_CLASS: &str = "sortable-list__placeholder";

/// One entry of the rendered list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEntry {
    Item(ListItem),
    /// Empty slot the dragged item will land in.
    Placeholder { width: i32, height: i32 },
    /// The detached item, drawn on top at the pointer.
    Dragging {
        item: ListItem,
        left: i32,
        top: i32,
        width: i32,
    },
}

/// What the list shows for a given order and drag session.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub entries: Vec<ListEntry>,
}

impl ListView {
    /// Without a session the items are shown in order. During a drag the
    /// other items are shown with the placeholder among them, followed by
    /// the dragged item.
    pub fn compute(items: &[ListItem], session: Option<&DragSession>) -> Self {
        let Some(session) = session else {
            return Self {
                entries: items.iter().cloned().map(ListEntry::Item).collect(),
            };
        };

        let mut entries: Vec<ListEntry> = items
            .iter()
            .filter(|item| item.id() != session.item())
            .cloned()
            .map(ListEntry::Item)
            .collect();

        let (width, height) = session.footprint();
        let slot = session.placeholder().min(entries.len());
        entries.insert(slot, ListEntry::Placeholder { width, height });

        if let Some(item) = items.iter().find(|item| item.id() == session.item()) {
            let origin = session.origin();
            entries.push(ListEntry::Dragging {
                item: item.clone(),
                left: origin.x,
                top: origin.y,
                width,
            });
        }

        Self { entries }
    }

    pub fn elements(&self) -> Vec<Element> {
        self.entries.iter().map(entry_element).collect()
    }
}

fn entry_element(entry: &ListEntry) -> Element {
    match entry {
        ListEntry::Item(item) => item_element(item),
        ListEntry::Placeholder { width, height } => Element::list_item()
            .class(PLACEHOLDER_CLASS)
            .width(*width)
            .height(*height),
        ListEntry::Dragging {
            item,
            left,
            top,
            width,
        } => item_element(item)
            .class(DRAGGING_CLASS)
            .absolute_at(*left, *top)
            .width(*width),
    }
}

fn item_element(item: &ListItem) -> Element {
    Element::list_item()
        .id(item.id().to_string())
        .class(ITEM_CLASS)
        .child(item.content().clone())
}

/// The list root.
pub fn list_element(id: &str, view: &ListView) -> Element {
    Element::list()
        .id(id)
        .class("sortable-list")
        .region(LIST)
        .children(view.elements())
}
