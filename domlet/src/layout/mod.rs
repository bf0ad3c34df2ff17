mod rect;
mod stack;

pub use rect::{Point, Rect};
pub use stack::{LINE_HEIGHT, LayoutResult, layout};
