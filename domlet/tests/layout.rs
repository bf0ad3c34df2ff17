use domlet::{Element, Rect, layout::layout};

fn layout_root(root: &Element) -> domlet::LayoutResult {
    layout(root, Rect::new(0, 0, 100, 1000))
}

// ============================================================================
// Stacking
// ============================================================================

#[test]
fn test_children_stack_in_document_order() {
    let root = Element::div()
        .id("root")
        .child(Element::div().id("a").height(10))
        .child(Element::div().id("b").height(20))
        .child(Element::div().id("c").height(5));

    let layout = layout_root(&root);

    assert_eq!(layout["a"], Rect::new(0, 0, 100, 10));
    assert_eq!(layout["b"], Rect::new(0, 10, 100, 20));
    assert_eq!(layout["c"], Rect::new(0, 30, 100, 5));
    assert_eq!(layout["root"].height, 35);
}

#[test]
fn test_text_takes_one_line() {
    let root = Element::div()
        .id("root")
        .child(Element::text("one").id("t1"))
        .child(Element::text("two").id("t2"));

    let layout = layout_root(&root);

    assert_eq!(layout["t2"].y, 1);
    assert_eq!(layout["root"].height, 2);
}

#[test]
fn test_explicit_width_is_kept() {
    let root = Element::div().id("root").child(Element::div().id("a").width(40).height(3));

    let layout = layout_root(&root);

    assert_eq!(layout["a"].width, 40);
}

// ============================================================================
// Absolute positioning and visibility
// ============================================================================

#[test]
fn test_absolute_child_does_not_consume_space() {
    let root = Element::div()
        .id("root")
        .child(Element::div().id("a").height(10))
        .child(Element::div().id("floating").height(10).absolute_at(7, 300))
        .child(Element::div().id("b").height(10));

    let layout = layout_root(&root);

    assert_eq!(layout["floating"], Rect::new(7, 300, 100, 10));
    assert_eq!(layout["b"].y, 10);
    assert_eq!(layout["root"].height, 20);
}

#[test]
fn test_hidden_elements_have_no_rect() {
    let root = Element::div()
        .id("root")
        .child(Element::div().id("a").height(10).hidden(true).child(Element::text("x").id("inner")))
        .child(Element::div().id("b").height(10));

    let layout = layout_root(&root);

    assert!(!layout.contains_key("a"));
    assert!(!layout.contains_key("inner"));
    assert_eq!(layout["b"].y, 0);
}

// ============================================================================
// Rect helpers
// ============================================================================

#[test]
fn test_rect_center_helpers() {
    let rect = Rect::new(0, 10, 50, 5);

    // center is 12.5
    assert!(rect.is_above_center(12));
    assert!(!rect.is_above_center(13));
    assert_eq!(rect.doubled_distance_y(12), 1);
    assert_eq!(rect.doubled_distance_y(13), 1);
}
