use std::collections::HashMap;

use super::Rect;
use crate::element::{Content, Element, Position};

pub type LayoutResult = HashMap<String, Rect>;

/// Height of a line of text without an explicit height.
pub const LINE_HEIGHT: i32 = 1;

/// Lay out `element` as a vertical stack inside `available`.
///
/// Static children are stacked top to bottom in document order. Absolute
/// children are placed at their `left`/`top` and do not consume space.
/// Hidden elements (and their subtrees) get no rect.
pub fn layout(element: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    layout_element(element, available.x, available.y, available.width, &mut result);
    result
}

/// Returns the height the element occupies in its parent's flow.
fn layout_element(element: &Element, x: i32, y: i32, width: i32, result: &mut LayoutResult) -> i32 {
    if element.hidden {
        return 0;
    }

    let (x, y) = match element.position {
        Position::Absolute => (element.left.unwrap_or(0), element.top.unwrap_or(0)),
        Position::Static => (x, y),
    };
    let width = element.width.unwrap_or(width);

    let content_height = match &element.content {
        Content::None => 0,
        Content::Text(_) => LINE_HEIGHT,
        Content::Children(children) => {
            let mut cursor = y;
            for child in children {
                cursor += layout_element(child, x, cursor, width, result);
            }
            cursor - y
        }
    };

    let height = element.height.unwrap_or(content_height);
    result.insert(element.id.clone(), Rect::new(x, y, width, height));

    match element.position {
        Position::Absolute => 0,
        Position::Static => height,
    }
}
