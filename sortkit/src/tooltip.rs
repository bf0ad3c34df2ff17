//! Pointer-following tooltip.
//!
//! Any element carrying a `data-tooltip` attribute shows the tooltip while
//! the pointer is over it. Only one tooltip exists per [`Singleton`].

use domlet::{Element, Event, Point, RenderSurface, closest, find_path};

use crate::registry::{Destroy, Singleton};

/// Attribute holding the tooltip text.
pub const TOOLTIP_ATTR: &str = "tooltip";

/// Tooltip configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipConfig {
    /// Distance from the pointer on both axes.
    ///
    /// Default: 10
    pub offset: i32,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self { offset: 10 }
    }
}

impl TooltipConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }
}

pub struct Tooltip {
    config: TooltipConfig,
    text: Option<String>,
    position: Point,
    surface: Box<dyn RenderSurface>,
}

impl std::fmt::Debug for Tooltip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tooltip")
            .field("config", &self.config)
            .field("text", &self.text)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl Tooltip {
    pub fn new(config: TooltipConfig, surface: impl RenderSurface + 'static) -> Self {
        Self {
            config,
            text: None,
            position: Point::default(),
            surface: Box::new(surface),
        }
    }

    /// Install a tooltip in `registry`, destroying the previous one.
    pub fn initialize(
        registry: &Singleton<Tooltip>,
        config: TooltipConfig,
        surface: impl RenderSurface + 'static,
    ) {
        registry.replace(Self::new(config, surface));
    }

    /// Text currently shown.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.text.is_some()
    }

    /// Top-left corner of the tooltip.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn show(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.paint();
    }

    pub fn hide(&mut self) {
        if self.text.take().is_some() {
            self.surface.unmount();
        }
    }

    /// Follow the pointer at `(x, y)`. Ignored while hidden.
    pub fn move_to(&mut self, x: i32, y: i32) {
        if !self.is_visible() {
            return;
        }
        self.position = Point::new(x + self.config.offset, y + self.config.offset);
        self.paint();
    }

    /// React to pointer events over `root`, the document the tooltip
    /// annotates.
    pub fn handle_event(&mut self, event: &Event, root: &Element) {
        match event {
            Event::PointerOver { target } => {
                if let Some(text) = tooltip_text(root, target.as_deref()) {
                    self.show(text);
                }
            }
            Event::PointerOut { related, .. } => {
                if tooltip_text(root, related.as_deref()).is_none() {
                    self.hide();
                }
            }
            Event::PointerMove { x, y } => self.move_to(*x, *y),
            _ => {}
        }
    }

    fn paint(&mut self) {
        let Some(text) = &self.text else {
            return;
        };
        let element = Element::div()
            .id("tooltip")
            .class("tooltip")
            .absolute_at(self.position.x, self.position.y)
            .child(Element::text(text.clone()));
        self.surface.mount(element);
    }
}

impl Destroy for Tooltip {
    fn destroy(&mut self) {
        self.hide();
    }
}

/// Text of the closest `data-tooltip` ancestor of `target`, inclusive.
fn tooltip_text(root: &Element, target: Option<&str>) -> Option<String> {
    let path = find_path(root, target?);
    closest(root, &path, |e| e.get_data(TOOLTIP_ATTR).is_some())
        .and_then(|e| e.get_data(TOOLTIP_ATTR).cloned())
}
