mod content;
mod node;

pub use content::Content;
pub use node::{Element, Position};

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    root.child_elements()
        .iter()
        .find_map(|child| find_element(child, id))
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    match &mut root.content {
        Content::Children(children) => children
            .iter_mut()
            .find_map(|child| find_element_mut(child, id)),
        _ => None,
    }
}

/// Find the first element (document order) that represents the named region.
pub fn find_region<'a>(root: &'a Element, name: &str) -> Option<&'a Element> {
    if root.region.as_deref() == Some(name) {
        return Some(root);
    }

    root.child_elements()
        .iter()
        .find_map(|child| find_region(child, name))
}

/// Find the named region, mutably.
pub fn find_region_mut<'a>(root: &'a mut Element, name: &str) -> Option<&'a mut Element> {
    if root.region.as_deref() == Some(name) {
        return Some(root);
    }

    match &mut root.content {
        Content::Children(children) => children
            .iter_mut()
            .find_map(|child| find_region_mut(child, name)),
        _ => None,
    }
}

/// Ids from `root` down to the element with `id`, inclusive. Empty when the
/// element is not in the tree.
pub fn find_path(root: &Element, id: &str) -> Vec<String> {
    let mut path = Vec::new();
    if collect_path(root, id, &mut path) {
        path
    } else {
        Vec::new()
    }
}

fn collect_path(element: &Element, id: &str, path: &mut Vec<String>) -> bool {
    path.push(element.id.clone());
    if element.id == id
        || element
            .child_elements()
            .iter()
            .any(|child| collect_path(child, id, path))
    {
        return true;
    }
    path.pop();
    false
}
