use domlet::{
    Element, LayoutResult, Rect, ScrollSignal, closest, find_path, hit_test, hit_test_path,
};

fn create_layout(elements: &[(&str, Rect)]) -> LayoutResult {
    let mut layout = LayoutResult::new();
    for (id, rect) in elements {
        layout.insert(id.to_string(), *rect);
    }
    layout
}

// ============================================================================
// Hit Testing
// ============================================================================

#[test]
fn test_hit_test_point_inside() {
    let root = Element::div()
        .id("root")
        .child(Element::text("Click me").id("btn"));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 50)),
        ("btn", Rect::new(10, 10, 30, 3)),
    ]);

    assert_eq!(hit_test(&layout, &root, 15, 11), Some("btn".to_string()));
    assert_eq!(hit_test(&layout, &root, 5, 5), Some("root".to_string()));
    assert_eq!(hit_test(&layout, &root, 150, 150), None);
}

#[test]
fn test_hit_test_overlapping_elements() {
    // Later children should be "on top"
    let root = Element::div()
        .id("root")
        .child(Element::div().id("bottom"))
        .child(Element::div().id("top"));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 100)),
        ("bottom", Rect::new(10, 10, 50, 50)),
        ("top", Rect::new(30, 30, 50, 50)),
    ]);

    assert_eq!(hit_test(&layout, &root, 40, 40), Some("top".to_string()));
    assert_eq!(hit_test(&layout, &root, 15, 15), Some("bottom".to_string()));
}

#[test]
fn test_hit_test_path_lists_ancestors() {
    let root = Element::div()
        .id("root")
        .child(Element::div().id("item").child(Element::span().id("handle")));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 100)),
        ("item", Rect::new(0, 0, 100, 20)),
        ("handle", Rect::new(0, 0, 10, 20)),
    ]);

    assert_eq!(
        hit_test_path(&layout, &root, 5, 5),
        vec!["root".to_string(), "item".to_string(), "handle".to_string()]
    );
}

#[test]
fn test_closest_walks_outwards() {
    let root = Element::div()
        .id("root")
        .child(
            Element::div()
                .id("item")
                .class("entry")
                .child(Element::span().id("handle").data("grab-handle", "")),
        );

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 100)),
        ("item", Rect::new(0, 0, 100, 20)),
        ("handle", Rect::new(0, 0, 10, 20)),
    ]);

    let path = hit_test_path(&layout, &root, 5, 5);
    let handle = closest(&root, &path, |e| e.get_data("grab-handle").is_some());
    let item = closest(&root, &path, |e| e.has_class("entry"));

    assert_eq!(handle.map(|e| e.id.as_str()), Some("handle"));
    assert_eq!(item.map(|e| e.id.as_str()), Some("item"));

    let path = hit_test_path(&layout, &root, 50, 5);
    assert!(closest(&root, &path, |e| e.get_data("grab-handle").is_some()).is_none());
}

#[test]
fn test_find_path_from_root() {
    let root = Element::div().id("root").child(
        Element::div()
            .id("row")
            .data("tooltip", "hint")
            .child(Element::text("cell").id("cell")),
    );

    let path = find_path(&root, "cell");
    assert_eq!(path, vec!["root", "row", "cell"]);
    assert_eq!(
        closest(&root, &path, |e| e.get_data("tooltip").is_some()).map(|e| e.id.as_str()),
        Some("row")
    );
    assert!(find_path(&root, "missing").is_empty());
}

// ============================================================================
// Scroll signals
// ============================================================================

#[test]
fn test_scroll_signal_bottom_visible() {
    assert!(ScrollSignal::new(500, 800).bottom_visible());
    assert!(!ScrollSignal::new(800, 800).bottom_visible());
    assert!(!ScrollSignal::new(1200, 800).bottom_visible());
}
