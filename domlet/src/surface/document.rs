use std::sync::{Arc, RwLock};

use super::{PointerCapture, RenderSurface, SurfaceError};
use crate::element::{
    Content, Element, find_element, find_element_mut, find_region, find_region_mut,
};
use crate::layout::{LayoutResult, Rect, layout};
use crate::text::outline;

/// A change applied to a [`Document`], recorded in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Mount,
    Unmount,
    ReplaceRegion { region: String, count: usize },
    AppendToRegion { region: String, count: usize },
    SetHidden { region: String, hidden: bool },
    ReplaceElement { id: String },
}

#[derive(Debug, Default)]
struct DocumentInner {
    root: Option<Element>,
    /// Current pointer capture owner and its token.
    capture: Option<(String, u64)>,
    next_capture: u64,
    mutations: Vec<Mutation>,
}

/// In-memory render surface.
///
/// Cloning is cheap and every clone sees the same tree, so a test (or a
/// host application) can keep a handle while a widget owns another.
#[derive(Debug, Clone, Default)]
pub struct Document {
    inner: Arc<RwLock<DocumentInner>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the mounted tree.
    pub fn root(&self) -> Option<Element> {
        self.inner.read().ok().and_then(|g| g.root.clone())
    }

    /// A copy of the element with this id.
    pub fn element(&self, id: &str) -> Option<Element> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.root.as_ref().and_then(|root| find_element(root, id).cloned()))
    }

    /// Owner of the current pointer capture.
    pub fn captured_by(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.capture.as_ref().map(|(owner, _)| owner.clone()))
    }

    /// Every mutation applied so far.
    pub fn mutations(&self) -> Vec<Mutation> {
        self.inner
            .read()
            .map(|g| g.mutations.clone())
            .unwrap_or_default()
    }

    pub fn clear_mutations(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.mutations.clear();
        }
    }

    /// Lay out the mounted tree inside `viewport`.
    pub fn layout(&self, viewport: Rect) -> LayoutResult {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.root.as_ref().map(|root| layout(root, viewport)))
            .unwrap_or_default()
    }

    /// Indented text outline of the mounted tree.
    pub fn outline(&self) -> String {
        self.root().map(|root| outline(&root)).unwrap_or_default()
    }

    fn with_region<R>(
        &self,
        name: &str,
        f: impl FnOnce(&mut Element) -> R,
    ) -> Result<R, SurfaceError> {
        let mut guard = self.inner.write().map_err(|_| SurfaceError::NotMounted)?;
        let root = guard.root.as_mut().ok_or(SurfaceError::NotMounted)?;
        let region =
            find_region_mut(root, name).ok_or_else(|| SurfaceError::UnknownRegion(name.into()))?;
        Ok(f(region))
    }

    fn record(&self, mutation: Mutation) {
        if let Ok(mut guard) = self.inner.write() {
            guard.mutations.push(mutation);
        }
    }
}

impl RenderSurface for Document {
    fn mount(&mut self, root: Element) {
        if let Ok(mut guard) = self.inner.write() {
            guard.root = Some(root);
            guard.mutations.push(Mutation::Mount);
        }
    }

    fn unmount(&mut self) {
        if let Ok(mut guard) = self.inner.write()
            && guard.root.take().is_some()
        {
            guard.capture = None;
            guard.mutations.push(Mutation::Unmount);
        }
    }

    fn is_mounted(&self) -> bool {
        self.inner.read().map(|g| g.root.is_some()).unwrap_or(false)
    }

    fn region(&self, name: &str) -> Option<Element> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.root.as_ref().and_then(|root| find_region(root, name).cloned()))
    }

    fn replace_region(&mut self, name: &str, children: Vec<Element>) -> Result<(), SurfaceError> {
        let count = children.len();
        self.with_region(name, |region| region.content = Content::Children(children))?;
        self.record(Mutation::ReplaceRegion {
            region: name.to_string(),
            count,
        });
        Ok(())
    }

    fn append_to_region(
        &mut self,
        name: &str,
        children: Vec<Element>,
    ) -> Result<(), SurfaceError> {
        let count = children.len();
        self.with_region(name, |region| match &mut region.content {
            Content::Children(existing) => existing.extend(children),
            content => *content = Content::Children(children),
        })?;
        self.record(Mutation::AppendToRegion {
            region: name.to_string(),
            count,
        });
        Ok(())
    }

    fn set_region_hidden(&mut self, name: &str, hidden: bool) -> Result<(), SurfaceError> {
        self.with_region(name, |region| region.hidden = hidden)?;
        self.record(Mutation::SetHidden {
            region: name.to_string(),
            hidden,
        });
        Ok(())
    }

    fn replace_element(&mut self, element: Element) -> Result<(), SurfaceError> {
        let id = element.id.clone();
        {
            let mut guard = self.inner.write().map_err(|_| SurfaceError::NotMounted)?;
            let root = guard.root.as_mut().ok_or(SurfaceError::NotMounted)?;
            let target = find_element_mut(root, &id)
                .ok_or_else(|| SurfaceError::UnknownElement(id.clone()))?;
            *target = element;
        }
        self.record(Mutation::ReplaceElement { id });
        Ok(())
    }

    fn capture_pointer(&self, owner: &str) -> PointerCapture {
        let Ok(mut guard) = self.inner.write() else {
            return PointerCapture::detached(owner);
        };

        let token = guard.next_capture;
        guard.next_capture += 1;
        if let Some((previous, _)) = guard.capture.replace((owner.to_string(), token)) {
            log::warn!("Pointer capture moved from {previous} to {owner}");
        }
        drop(guard);

        let inner = Arc::clone(&self.inner);
        PointerCapture::new(owner, move || {
            if let Ok(mut guard) = inner.write()
                && matches!(guard.capture, Some((_, t)) if t == token)
            {
                guard.capture = None;
            }
        })
    }
}
