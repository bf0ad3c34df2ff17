use domlet::{Document, Element, Event, LayoutResult, MouseButton, Point, Rect, RenderSurface};
use sortkit::Error;
use sortkit::list::{
    DELETE_HANDLE, GRAB_HANDLE, ItemId, LIST, ListEntry, PLACEHOLDER_CLASS, SortableList,
};

/// An item three rows tall: label, grab handle, delete handle.
fn item(name: &str) -> Element {
    Element::div()
        .child(Element::text(name))
        .child(Element::span().data(GRAB_HANDLE, "").height(1))
        .child(Element::span().data(DELETE_HANDLE, "").height(1))
}

fn abcd(doc: &Document) -> SortableList {
    SortableList::new(["A", "B", "C", "D"].map(item), doc.clone())
}

fn layout(doc: &Document) -> LayoutResult {
    doc.layout(Rect::new(0, 0, 80, 100))
}

fn names(list: &SortableList) -> Vec<String> {
    list.items()
        .iter()
        .map(|item| item.content().text_content())
        .collect()
}

fn id_of(list: &SortableList, name: &str) -> ItemId {
    list.items()
        .iter()
        .find(|item| item.content().text_content() == name)
        .map(|item| item.id())
        .unwrap()
}

fn down(list: &SortableList, doc: &Document, x: i32, y: i32) -> sortkit::Result<()> {
    let event = Event::PointerDown {
        x,
        y,
        button: MouseButton::Left,
    };
    list.handle_event(&event, &layout(doc))
}

fn move_to(list: &SortableList, doc: &Document, x: i32, y: i32) -> sortkit::Result<()> {
    list.handle_event(&Event::PointerMove { x, y }, &layout(doc))
}

fn up(list: &SortableList, doc: &Document) -> sortkit::Result<()> {
    list.handle_event(&Event::PointerUp { x: 0, y: 0 }, &layout(doc))
}

// ============================================================================
// Items
// ============================================================================

#[test]
fn test_new_list_mounts_items_in_order() {
    let doc = Document::new();
    let list = abcd(&doc);

    assert_eq!(names(&list), vec!["A", "B", "C", "D"]);
    assert_eq!(doc.region(LIST).unwrap().child_elements().len(), 4);
}

#[test]
fn test_add_item_at_position_or_end() {
    let doc = Document::new();
    let list = abcd(&doc);

    list.add_item(item("X"), Some(1)).unwrap();
    list.add_item(item("Y"), None).unwrap();
    list.add_item(item("Z"), Some(99)).unwrap();

    assert_eq!(names(&list), vec!["A", "X", "B", "C", "D", "Y", "Z"]);
}

#[test]
fn test_remove_item_by_id() {
    let doc = Document::new();
    let list = abcd(&doc);
    let b = id_of(&list, "B");

    let removed = list.remove_item(b).unwrap();

    assert_eq!(removed.id(), b);
    assert_eq!(names(&list), vec!["A", "C", "D"]);
    assert_eq!(list.remove_item(b), Err(Error::NotFound(b.to_string())));
}

// ============================================================================
// Dragging
// ============================================================================

#[test]
fn test_drag_above_nearest_center_reorders() {
    let doc = Document::new();
    let list = abcd(&doc);

    // C spans rows 6..9; its grab handle is row 7.
    down(&list, &doc, 1, 7).unwrap();
    assert_eq!(list.dragged(), Some(id_of(&list, "C")));
    assert_eq!(list.placeholder(), Some(2));

    // Row 4 is nearest B's center (4.5) and above it.
    move_to(&list, &doc, 1, 4).unwrap();
    assert_eq!(list.placeholder(), Some(1));
    assert_eq!(names(&list), vec!["A", "B", "C", "D"]);

    up(&list, &doc).unwrap();
    assert_eq!(names(&list), vec!["A", "C", "B", "D"]);
    assert!(!list.is_dragging());
}

#[test]
fn test_drag_below_last_item() {
    let doc = Document::new();
    let list = abcd(&doc);

    down(&list, &doc, 1, 7).unwrap();
    move_to(&list, &doc, 1, 20).unwrap();
    up(&list, &doc).unwrap();

    assert_eq!(names(&list), vec!["A", "B", "D", "C"]);
}

#[test]
fn test_pointer_between_centers_settles_after_earlier_item() {
    let doc = Document::new();
    let list = abcd(&doc);

    // A's grab handle is row 1.
    down(&list, &doc, 1, 1).unwrap();
    assert_eq!(list.placeholder(), Some(0));

    // Row 6 is halfway between B's center (4.5) and C's (7.5).
    move_to(&list, &doc, 1, 6).unwrap();
    assert_eq!(list.placeholder(), Some(1));

    up(&list, &doc).unwrap();
    assert_eq!(names(&list), vec!["B", "A", "C", "D"]);
}

#[test]
fn test_dragged_item_follows_pointer_with_fixed_offset() {
    let doc = Document::new();
    let list = abcd(&doc);

    down(&list, &doc, 1, 7).unwrap();
    assert_eq!(list.drag_origin(), Some(Point::new(0, 6)));

    move_to(&list, &doc, 5, 4).unwrap();
    assert_eq!(list.drag_origin(), Some(Point::new(4, 3)));

    let dragged = doc.element(&id_of(&list, "C").to_string()).unwrap();
    assert_eq!((dragged.left, dragged.top), (Some(4), Some(3)));
}

#[test]
fn test_view_shows_placeholder_with_item_footprint() {
    let doc = Document::new();
    let list = abcd(&doc);

    down(&list, &doc, 1, 7).unwrap();

    let entries = list.view().unwrap().entries;
    assert_eq!(entries.len(), 5);
    assert_eq!(
        entries[2],
        ListEntry::Placeholder {
            width: 80,
            height: 3
        }
    );
    assert!(matches!(&entries[4], ListEntry::Dragging { item, .. } if item.content().text_content() == "C"));

    let region = doc.region(LIST).unwrap();
    assert!(region.child_elements()[2].has_class(PLACEHOLDER_CLASS));
}

#[test]
fn test_pointer_down_outside_handles_is_ignored() {
    let doc = Document::new();
    let list = abcd(&doc);

    // Row 6 is C's label.
    down(&list, &doc, 1, 6).unwrap();

    assert!(!list.is_dragging());
    assert_eq!(list.len(), 4);
}

#[test]
fn test_second_grab_is_rejected() {
    let doc = Document::new();
    let list = abcd(&doc);
    down(&list, &doc, 1, 7).unwrap();

    let a = id_of(&list, "A");
    let result = list.grab(a, Point::new(1, 1), &layout(&doc));

    assert!(matches!(result, Err(Error::InvalidState(_))));
    assert_eq!(list.dragged(), Some(id_of(&list, "C")));
}

#[test]
fn test_drag_capture_released_on_drop() {
    let doc = Document::new();
    let list = abcd(&doc);

    down(&list, &doc, 1, 7).unwrap();
    assert_eq!(doc.captured_by(), Some(list.id().to_string()));

    up(&list, &doc).unwrap();
    assert_eq!(doc.captured_by(), None);
}

#[test]
fn test_single_item_keeps_placeholder() {
    let doc = Document::new();
    let list = SortableList::new([item("only")], doc.clone());

    down(&list, &doc, 1, 1).unwrap();
    move_to(&list, &doc, 1, 40).unwrap();

    assert_eq!(list.placeholder(), Some(0));
    up(&list, &doc).unwrap();
    assert_eq!(names(&list), vec!["only"]);
}

#[test]
fn test_release_without_drag_is_noop() {
    let doc = Document::new();
    let list = abcd(&doc);

    assert_eq!(list.release(), Ok(()));
    assert_eq!(names(&list), vec!["A", "B", "C", "D"]);
}

// ============================================================================
// Removal during a drag
// ============================================================================

#[test]
fn test_delete_handle_removes_item() {
    let doc = Document::new();
    let list = abcd(&doc);

    // B spans rows 3..6; its delete handle is row 5.
    down(&list, &doc, 1, 5).unwrap();

    assert_eq!(names(&list), vec!["A", "C", "D"]);
    assert_eq!(doc.region(LIST).unwrap().child_elements().len(), 3);
}

#[test]
fn test_removing_dragged_item_cancels_drag() {
    let doc = Document::new();
    let list = abcd(&doc);
    down(&list, &doc, 1, 7).unwrap();

    list.remove_item(id_of(&list, "C")).unwrap();

    assert!(!list.is_dragging());
    assert_eq!(list.len(), 3);
    assert_eq!(doc.captured_by(), None);
    let region = doc.region(LIST).unwrap();
    assert!(
        region
            .child_elements()
            .iter()
            .all(|e| !e.has_class(PLACEHOLDER_CLASS))
    );
}

#[test]
fn test_removing_item_before_placeholder_shifts_it() {
    let doc = Document::new();
    let list = abcd(&doc);
    down(&list, &doc, 1, 7).unwrap();

    list.remove_item(id_of(&list, "A")).unwrap();
    assert_eq!(list.placeholder(), Some(1));

    up(&list, &doc).unwrap();
    assert_eq!(names(&list), vec!["B", "C", "D"]);
}

#[test]
fn test_adding_item_before_placeholder_shifts_it() {
    let doc = Document::new();
    let list = abcd(&doc);
    down(&list, &doc, 1, 7).unwrap();

    list.add_item(item("X"), Some(0)).unwrap();
    assert_eq!(list.placeholder(), Some(3));

    up(&list, &doc).unwrap();
    assert_eq!(names(&list), vec!["X", "A", "B", "C", "D"]);
}

#[test]
fn test_destroy_releases_capture_and_unmounts() {
    let doc = Document::new();
    let list = abcd(&doc);
    down(&list, &doc, 1, 7).unwrap();

    list.destroy();

    assert!(!doc.is_mounted());
    assert_eq!(doc.captured_by(), None);
}
