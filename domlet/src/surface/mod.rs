//! Render surfaces widgets draw into.

mod capture;
mod document;

pub use capture::PointerCapture;
pub use document::{Document, Mutation};

use thiserror::Error;

use crate::element::Element;

/// Errors raised by a render surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// Nothing is mounted.
    #[error("surface is not mounted")]
    NotMounted,

    /// The mounted tree has no region with this name.
    #[error("unknown region '{0}'")]
    UnknownRegion(String),

    /// The mounted tree has no element with this id.
    #[error("unknown element '{0}'")]
    UnknownElement(String),
}

/// Something a widget can mount an element tree into and patch afterwards.
///
/// Widgets address the parts of their tree by region name (`data-element`)
/// so a surface never needs to understand widget markup.
pub trait RenderSurface: Send + Sync {
    /// Mount `root`, replacing whatever was mounted.
    fn mount(&mut self, root: Element);

    /// Remove the mounted tree.
    fn unmount(&mut self);

    fn is_mounted(&self) -> bool;

    /// A copy of the named region, if mounted and present.
    fn region(&self, name: &str) -> Option<Element>;

    /// Replace the children of a region.
    fn replace_region(&mut self, name: &str, children: Vec<Element>) -> Result<(), SurfaceError>;

    /// Append children to a region, leaving existing children untouched.
    fn append_to_region(&mut self, name: &str, children: Vec<Element>)
    -> Result<(), SurfaceError>;

    /// Show or hide a region.
    fn set_region_hidden(&mut self, name: &str, hidden: bool) -> Result<(), SurfaceError>;

    /// Replace a single element (matched by id) in place.
    fn replace_element(&mut self, element: Element) -> Result<(), SurfaceError>;

    /// Route all pointer input to `owner` until the returned guard drops.
    fn capture_pointer(&self, owner: &str) -> PointerCapture {
        PointerCapture::detached(owner)
    }
}
