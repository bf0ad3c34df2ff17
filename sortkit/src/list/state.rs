//! Sortable list state.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use domlet::{Element, LayoutResult, Point, RenderSurface};

use super::item::{ItemId, ListItem};
use super::session::DragSession;
use super::view::{LIST, ListView, list_element};
use crate::error::{Error, Result};

/// Unique identifier for a SortableList widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(usize);

impl ListId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__list_{}", self.0)
    }
}

pub(super) struct ListInner {
    /// Committed order.
    items: Vec<ListItem>,
    session: Option<DragSession>,
    pub(super) surface: Box<dyn RenderSurface>,
}

impl ListInner {
    fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Items other than the dragged one, in committed order.
    fn others(&self) -> impl Iterator<Item = &ListItem> {
        let dragged = self.session.as_ref().map(DragSession::item);
        self.items
            .iter()
            .filter(move |item| Some(item.id()) != dragged)
    }

    fn view(&self) -> ListView {
        ListView::compute(&self.items, self.session.as_ref())
    }

    fn paint(&mut self) -> Result<()> {
        if !self.surface.is_mounted() {
            return Ok(());
        }
        let elements = self.view().elements();
        self.surface.replace_region(LIST, elements)?;
        Ok(())
    }
}

/// A list whose items can be reordered by dragging their grab handles.
///
/// The committed order only changes on [`add_item`](Self::add_item),
/// [`remove_item`](Self::remove_item) and [`release`](Self::release); a drag
/// in progress only moves the placeholder.
#[derive(Clone)]
pub struct SortableList {
    id: ListId,
    inner: Arc<RwLock<ListInner>>,
}

impl std::fmt::Debug for SortableList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortableList")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl SortableList {
    /// Create a list of `items` and mount it into `surface`.
    pub fn new(
        items: impl IntoIterator<Item = Element>,
        surface: impl RenderSurface + 'static,
    ) -> Self {
        let id = ListId::new();
        let mut inner = ListInner {
            items: items.into_iter().map(ListItem::new).collect(),
            session: None,
            surface: Box::new(surface),
        };
        let root = list_element(&id.to_string(), &inner.view());
        inner.surface.mount(root);

        Self {
            id,
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    pub fn id(&self) -> ListId {
        self.id
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ListInner>> {
        self.inner
            .read()
            .map_err(|_| Error::InvalidState("list state poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ListInner>> {
        self.inner
            .write()
            .map_err(|_| Error::InvalidState("list state poisoned"))
    }

    pub(super) fn with_inner<R>(&self, f: impl FnOnce(&ListInner) -> R) -> Result<R> {
        Ok(f(&*self.read()?))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Items in committed order.
    pub fn items(&self) -> Vec<ListItem> {
        self.inner
            .read()
            .map(|g| g.items.clone())
            .unwrap_or_default()
    }

    /// Item ids in committed order.
    pub fn order(&self) -> Vec<ItemId> {
        self.inner
            .read()
            .map(|g| g.items.iter().map(ListItem::id).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_dragging(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.session.is_some())
            .unwrap_or(false)
    }

    /// The item being dragged.
    pub fn dragged(&self) -> Option<ItemId> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.session.as_ref().map(DragSession::item))
    }

    /// Placeholder slot among the items that are not dragged.
    pub fn placeholder(&self) -> Option<usize> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.session.as_ref().map(DragSession::placeholder))
    }

    /// Top-left corner of the dragged item.
    pub fn drag_origin(&self) -> Option<Point> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.session.as_ref().map(DragSession::origin))
    }

    pub fn view(&self) -> Result<ListView> {
        Ok(self.read()?.view())
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Insert `content` at `position` (clamped), or append it.
    pub fn add_item(&self, content: Element, position: Option<usize>) -> Result<ItemId> {
        let item = ListItem::new(content);
        let id = item.id();

        let mut guard = self.write()?;
        let index = position.unwrap_or(guard.items.len()).min(guard.items.len());
        guard.items.insert(index, item);

        // Keep the placeholder next to the same neighbours.
        let slot = guard.others().position(|item| item.id() == id);
        if let (Some(slot), Some(session)) = (slot, guard.session.as_mut())
            && slot <= session.placeholder()
        {
            session.set_placeholder(session.placeholder() + 1);
        }

        log::debug!("{} added item {} at {}", self.id, id, index);
        guard.paint()?;
        Ok(id)
    }

    /// Remove an item. Removing the dragged item cancels the drag.
    pub fn remove_item(&self, id: ItemId) -> Result<ListItem> {
        let mut guard = self.write()?;
        let index = guard
            .index_of(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        if guard.session.as_ref().map(DragSession::item) == Some(id) {
            log::debug!("{} dragged item {} removed, cancelling drag", self.id, id);
            guard.session = None;
        } else if guard.session.is_some() {
            let slot = guard.others().position(|item| item.id() == id);
            if let (Some(slot), Some(session)) = (slot, guard.session.as_mut())
                && slot < session.placeholder()
            {
                session.set_placeholder(session.placeholder() - 1);
            }
        }

        let item = guard.items.remove(index);
        log::debug!("{} removed item {}", self.id, id);
        guard.paint()?;
        Ok(item)
    }

    /// Start dragging `id`, grabbed at `pointer`. The item's box is read
    /// from `layout`.
    pub fn grab(&self, id: ItemId, pointer: Point, layout: &LayoutResult) -> Result<()> {
        let mut guard = self.write()?;
        if guard.session.is_some() {
            log::warn!("{} ignoring grab while a drag is active", self.id);
            return Err(Error::InvalidState("a drag is already in progress"));
        }
        let index = guard
            .index_of(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let rect = layout.get(&id.to_string()).copied().unwrap_or_default();

        let capture = guard.surface.capture_pointer(&self.id.to_string());
        guard.session = Some(DragSession::start(id, pointer, rect, index, capture));

        log::debug!("{} grabbed item {} at {:?}", self.id, id, pointer);
        guard.paint()
    }

    /// Move the dragged item with the pointer and reposition the
    /// placeholder next to the item whose vertical center is nearest.
    pub fn drag_to(&self, pointer: Point, layout: &LayoutResult) -> Result<()> {
        let mut guard = self.write()?;
        if guard.session.is_none() {
            return Err(Error::InvalidState("no drag in progress"));
        }

        let slot = nearest_slot(guard.others(), layout, pointer.y);
        if let Some(session) = guard.session.as_mut() {
            session.move_to(pointer);
            if let Some(slot) = slot {
                session.set_placeholder(slot);
            }
        }
        guard.paint()
    }

    /// Drop the dragged item into the placeholder's slot. Without a drag
    /// this does nothing.
    pub fn release(&self) -> Result<()> {
        let mut guard = self.write()?;
        let Some(session) = guard.session.take() else {
            return Ok(());
        };

        if let Some(index) = guard.index_of(session.item()) {
            let item = guard.items.remove(index);
            let slot = session.placeholder().min(guard.items.len());
            guard.items.insert(slot, item);
            log::debug!("{} dropped item {} at {}", self.id, session.item(), slot);
        }
        drop(session);
        guard.paint()
    }

    /// Abandon the drag without changing the order.
    pub fn cancel(&self) -> Result<()> {
        let mut guard = self.write()?;
        if guard.session.take().is_some() {
            log::debug!("{} drag cancelled", self.id);
            guard.paint()?;
        }
        Ok(())
    }

    /// End any drag and unmount the list.
    pub fn destroy(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.session = None;
            guard.surface.unmount();
            log::debug!("{} destroyed", self.id);
        }
    }
}

/// Placeholder slot for a pointer at height `y`: before the nearest item
/// when above its center, after it otherwise. Ties go to the earlier item.
fn nearest_slot<'a>(
    others: impl Iterator<Item = &'a ListItem>,
    layout: &LayoutResult,
    y: i32,
) -> Option<usize> {
    let mut nearest: Option<(usize, i32, bool)> = None;
    for (index, item) in others.enumerate() {
        let Some(rect) = layout.get(&item.id().to_string()) else {
            continue;
        };
        let distance = rect.doubled_distance_y(y);
        if nearest.is_none_or(|(_, best, _)| distance < best) {
            nearest = Some((index, distance, rect.is_above_center(y)));
        }
    }
    nearest.map(|(index, _, above)| if above { index } else { index + 1 })
}
