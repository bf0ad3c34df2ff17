pub mod element;
pub mod event;
pub mod hit;
pub mod layout;
pub mod surface;
pub mod text;

pub use element::{Content, Element, Position, find_element, find_path, find_region};
pub use event::{Event, MouseButton, ScrollSignal};
pub use hit::{closest, hit_test, hit_test_path};
pub use layout::{LayoutResult, Point, Rect};
pub use surface::{Document, Mutation, PointerCapture, RenderSurface, SurfaceError};
pub use text::outline;
