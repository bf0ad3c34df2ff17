use crate::element::{Element, find_element};
use crate::layout::LayoutResult;

/// Find the deepest element at the given coordinates.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: i32, y: i32) -> Option<String> {
    hit_test_path(layout, root, x, y).pop()
}

/// Ids of every element containing the point, from `root` down to the
/// deepest hit. Empty when the point is outside `root`.
pub fn hit_test_path(layout: &LayoutResult, root: &Element, x: i32, y: i32) -> Vec<String> {
    let mut path = Vec::new();
    hit_test_element(layout, root, x, y, &mut path);
    path
}

fn hit_test_element(
    layout: &LayoutResult,
    element: &Element,
    x: i32,
    y: i32,
    path: &mut Vec<String>,
) -> bool {
    let Some(rect) = layout.get(&element.id) else {
        return false;
    };

    path.push(element.id.clone());

    // Check children in reverse order (last rendered = on top)
    for child in element.child_elements().iter().rev() {
        if hit_test_element(layout, child, x, y, path) {
            return true;
        }
    }

    if rect.contains(x, y) {
        true
    } else {
        path.pop();
        false
    }
}

/// Walk a hit path from the deepest element outwards and return the first
/// element matching `predicate`, like `Element.closest()`.
pub fn closest<'a>(
    root: &'a Element,
    path: &[String],
    predicate: impl Fn(&Element) -> bool,
) -> Option<&'a Element> {
    path.iter()
        .rev()
        .filter_map(|id| find_element(root, id))
        .find(|element| predicate(element))
}
