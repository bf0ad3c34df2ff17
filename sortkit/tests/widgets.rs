use std::time::Duration;

use domlet::{Document, Element, Event, MouseButton, Point, Rect, RenderSurface};
use sortkit::Error;
use sortkit::notification::{
    DEFAULT_MESSAGE, Notification, NotificationCenter, NotificationConfig, NotificationKind,
};
use sortkit::registry::{Destroy, Singleton};
use sortkit::slider::{FROM, RangeSelect, RangeSlider, Selection, SliderConfig, Thumb};
use sortkit::tooltip::{TOOLTIP_ATTR, Tooltip, TooltipConfig};

// ============================================================================
// Range slider
// ============================================================================

#[test]
fn test_slider_defaults_to_whole_range() {
    let slider = RangeSlider::new(SliderConfig::default(), Document::new());

    assert_eq!(slider.selected(), Selection { from: 100, to: 200 });
    let view = slider.view();
    assert_eq!((view.left, view.right), (0.0, 100.0));
}

#[test]
fn test_slider_initial_selection_and_formatter() {
    let doc = Document::new();
    let slider = RangeSlider::new(
        SliderConfig::new(0, 1000)
            .with_selected(250, 500)
            .with_formatter(|v| format!("${v}")),
        doc.clone(),
    );

    let view = slider.view();
    assert_eq!((view.left, view.right), (25.0, 50.0));
    assert_eq!(view.from, "$250");
    assert_eq!(view.to, "$500");
    assert_eq!(doc.region(FROM).unwrap().text_content(), "$250");
}

#[test]
fn test_slider_thumbs_cannot_cross() {
    let mut slider = RangeSlider::new(
        SliderConfig::new(100, 200).with_selected(120, 150),
        Document::new(),
    );

    slider.grab(Thumb::Left).unwrap();
    slider.drag_to(90, 0, 100).unwrap();
    assert_eq!(slider.selected(), Selection { from: 150, to: 150 });
    slider.release().unwrap();

    slider.grab(Thumb::Right).unwrap();
    slider.drag_to(10, 0, 100).unwrap();
    assert_eq!(slider.selected(), Selection { from: 150, to: 150 });
}

#[test]
fn test_slider_clamps_to_track() {
    let mut slider = RangeSlider::new(SliderConfig::default(), Document::new());

    slider.grab(Thumb::Right).unwrap();
    slider.drag_to(500, 0, 100).unwrap();
    assert_eq!(slider.view().right, 100.0);

    slider.release().unwrap();
    slider.grab(Thumb::Left).unwrap();
    slider.drag_to(-20, 0, 100).unwrap();
    assert_eq!(slider.view().left, 0.0);
}

#[test]
fn test_slider_release_reports_selection() {
    let doc = Document::new();
    let mut slider = RangeSlider::new(SliderConfig::default(), doc.clone());

    slider.grab(Thumb::Left).unwrap();
    assert_eq!(doc.captured_by().as_deref(), Some("range-slider"));
    slider.drag_to(30, 10, 40).unwrap();

    let selected = slider.release().unwrap();

    assert_eq!(selected, Some(RangeSelect { from: 150, to: 200 }));
    assert_eq!(doc.captured_by(), None);
    assert_eq!(slider.release(), Ok(None));
}

#[test]
fn test_slider_rejects_second_grab() {
    let mut slider = RangeSlider::new(SliderConfig::default(), Document::new());
    slider.grab(Thumb::Left).unwrap();

    assert!(matches!(
        slider.grab(Thumb::Right),
        Err(Error::InvalidState(_))
    ));
    assert_eq!(slider.dragging(), Some(Thumb::Left));
    assert!(matches!(
        RangeSlider::new(SliderConfig::default(), Document::new()).drag_to(1, 0, 10),
        Err(Error::InvalidState(_))
    ));
}

#[test]
fn test_slider_pointer_events() {
    let doc = Document::new();
    let mut slider = RangeSlider::new(SliderConfig::default(), doc.clone());
    let layout = doc.layout(Rect::new(0, 0, 80, 10));
    let thumb = layout["range-slider__thumb-right"];

    let down = Event::PointerDown {
        x: thumb.x,
        y: thumb.y,
        button: MouseButton::Left,
    };
    assert_eq!(slider.handle_event(&down, &layout), Ok(None));
    assert_eq!(slider.dragging(), Some(Thumb::Right));

    let layout = doc.layout(Rect::new(0, 0, 80, 10));
    slider
        .handle_event(&Event::PointerMove { x: 40, y: 0 }, &layout)
        .unwrap();
    let selected = slider
        .handle_event(&Event::PointerUp { x: 40, y: 0 }, &layout)
        .unwrap();

    assert_eq!(selected, Some(RangeSelect { from: 100, to: 150 }));
}

// ============================================================================
// Tooltip
// ============================================================================

fn annotated() -> (Element, String, String) {
    let inner = Element::text("price");
    let plain = Element::text("plain");
    let (inner_id, plain_id) = (inner.id.clone(), plain.id.clone());
    let root = Element::div()
        .child(Element::div().data(TOOLTIP_ATTR, "Unit price").child(inner))
        .child(plain);
    (root, inner_id, plain_id)
}

#[test]
fn test_tooltip_shows_closest_annotation() {
    let doc = Document::new();
    let (root, inner, _) = annotated();
    let mut tooltip = Tooltip::new(TooltipConfig::default(), doc.clone());

    tooltip.handle_event(&Event::PointerOver { target: Some(inner) }, &root);

    assert_eq!(tooltip.text(), Some("Unit price"));
    assert!(doc.is_mounted());
    assert_eq!(doc.element("tooltip").unwrap().text_content(), "Unit price");
}

#[test]
fn test_tooltip_ignores_unannotated_targets() {
    let doc = Document::new();
    let (root, _, plain) = annotated();
    let mut tooltip = Tooltip::new(TooltipConfig::default(), doc.clone());

    tooltip.handle_event(&Event::PointerOver { target: Some(plain) }, &root);

    assert!(!tooltip.is_visible());
    assert!(!doc.is_mounted());
}

#[test]
fn test_tooltip_follows_pointer_with_offset() {
    let doc = Document::new();
    let mut tooltip = Tooltip::new(TooltipConfig::new().with_offset(2), doc.clone());

    tooltip.move_to(5, 5);
    assert_eq!(tooltip.position(), Point::default());

    tooltip.show("hint");
    tooltip.move_to(5, 7);

    assert_eq!(tooltip.position(), Point::new(7, 9));
    let element = doc.element("tooltip").unwrap();
    assert_eq!((element.left, element.top), (Some(7), Some(9)));
}

#[test]
fn test_tooltip_hides_when_pointer_leaves_annotation() {
    let doc = Document::new();
    let (root, inner, plain) = annotated();
    let mut tooltip = Tooltip::new(TooltipConfig::default(), doc.clone());
    tooltip.handle_event(
        &Event::PointerOver {
            target: Some(inner.clone()),
        },
        &root,
    );

    tooltip.handle_event(
        &Event::PointerOut {
            target: Some(inner),
            related: Some(plain),
        },
        &root,
    );

    assert!(!tooltip.is_visible());
    assert!(!doc.is_mounted());
}

#[test]
fn test_tooltip_initialize_replaces_previous_instance() {
    let first = Document::new();
    let second = Document::new();
    let registry = Singleton::new();

    Tooltip::initialize(&registry, TooltipConfig::default(), first.clone());
    registry.with_mut(|t| t.show("first"));
    Tooltip::initialize(&registry, TooltipConfig::default(), second.clone());

    assert!(!first.is_mounted());
    assert_eq!(registry.with(|t| t.is_visible()), Some(false));
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn test_notification_defaults() {
    let notification = Notification::new("", NotificationConfig::new());

    assert_eq!(notification.message, DEFAULT_MESSAGE);
    assert_eq!(notification.kind, NotificationKind::Success);
    assert_eq!(notification.duration, Duration::from_secs(1));
}

#[test]
fn test_zero_duration_keeps_default() {
    let config = NotificationConfig::new().with_duration(Duration::ZERO);

    assert_eq!(config.duration, Duration::from_secs(1));
}

#[test]
fn test_notification_element_carries_kind() {
    let notification = Notification::new(
        "Saved",
        NotificationConfig::new().with_kind(NotificationKind::Error),
    );
    let element = notification.element();

    assert!(element.has_class("error"));
    assert_eq!(element.text_content(), "errorSaved");
}

#[tokio::test(start_paused = true)]
async fn test_notification_dismisses_itself() {
    let doc = Document::new();
    let center = NotificationCenter::new();

    let id = center.show(Notification::new("Saved", NotificationConfig::new()), doc.clone());
    assert_eq!(center.active().map(|n| n.id()), Some(id));
    assert!(doc.is_mounted());

    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert_eq!(center.active(), None);
    assert!(!doc.is_mounted());
}

#[tokio::test(start_paused = true)]
async fn test_new_notification_replaces_current() {
    let first = Document::new();
    let second = Document::new();
    let center = NotificationCenter::new();

    center.show(Notification::new("one", NotificationConfig::new()), first.clone());
    tokio::time::sleep(Duration::from_millis(500)).await;
    let id = center.show(Notification::new("two", NotificationConfig::new()), second.clone());

    assert!(!first.is_mounted());
    assert!(second.is_mounted());

    // The first timer would have fired here.
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert_eq!(center.active().map(|n| n.id()), Some(id));

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(center.active(), None);
    assert!(!second.is_mounted());
}

#[tokio::test(start_paused = true)]
async fn test_shared_surface_shows_latest_notification() {
    let doc = Document::new();
    let center = NotificationCenter::new();

    center.show(Notification::new("one", NotificationConfig::new()), doc.clone());
    center.show(Notification::new("two", NotificationConfig::new()), doc.clone());

    assert!(doc.is_mounted());
    assert!(doc.outline().contains("two"));
}

#[tokio::test]
async fn test_dismiss_only_matches_active_id() {
    let doc = Document::new();
    let center = NotificationCenter::new();
    let stale = Notification::default().id();
    let id = center.show(Notification::default(), doc.clone());

    assert!(!center.dismiss(stale));
    assert!(center.dismiss(id));
    assert!(!doc.is_mounted());
}

#[test]
fn test_notification_without_runtime_stays() {
    let doc = Document::new();
    let center = NotificationCenter::new();

    center.show(Notification::default(), doc.clone());

    assert!(center.active().is_some());
    assert!(doc.is_mounted());
}

// ============================================================================
// Singleton registry
// ============================================================================

#[derive(Default)]
struct Counted {
    destroyed: std::sync::Arc<std::sync::atomic::AtomicUsize>,
}

impl Destroy for Counted {
    fn destroy(&mut self) {
        self.destroyed
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

#[test]
fn test_singleton_destroys_previous_on_replace() {
    let first = Counted::default();
    let destroyed = first.destroyed.clone();
    let slot = Singleton::new();

    slot.replace(first);
    slot.replace(Counted::default());

    assert_eq!(destroyed.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert!(slot.is_occupied());
}

#[test]
fn test_singleton_clones_share_the_slot() {
    let slot: Singleton<Counted> = Singleton::new();
    let other = slot.clone();

    other.replace(Counted::default());
    assert!(slot.is_occupied());

    assert!(slot.clear());
    assert!(!other.is_occupied());
    assert!(!other.clear());
}

#[test]
fn test_singleton_clear_if_checks_predicate() {
    let slot = Singleton::new();
    slot.replace(Counted::default());

    assert!(!slot.clear_if(|_| false));
    assert!(slot.is_occupied());
    assert!(slot.clear_if(|_| true));
}
