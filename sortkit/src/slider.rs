//! Two-thumb range slider.

use std::fmt;
use std::sync::Arc;

use domlet::{
    Element, Event, LayoutResult, PointerCapture, RenderSurface, closest, hit_test_path,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const FROM: &str = "from";
pub const TO: &str = "to";
pub const INNER: &str = "inner";
pub const THUMB_ATTR: &str = "thumb";

/// Formats a slider value for display.
pub type ValueFormatter = Arc<dyn Fn(i64) -> String + Send + Sync>;

/// A closed range of slider values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub from: i64,
    pub to: i64,
}

/// Emitted when a thumb is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSelect {
    pub from: i64,
    pub to: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thumb {
    Left,
    Right,
}

impl Thumb {
    fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Slider configuration.
#[derive(Clone)]
pub struct SliderConfig {
    /// Default: 100
    pub min: i64,
    /// Default: 200
    pub max: i64,
    /// Initially selected range. Default: the whole range.
    pub selected: Option<Selection>,
    formatter: Option<ValueFormatter>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 100,
            max: 200,
            selected: None,
            formatter: None,
        }
    }
}

impl fmt::Debug for SliderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderConfig")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl SliderConfig {
    pub fn new(min: i64, max: i64) -> Self {
        Self {
            min,
            max,
            ..Default::default()
        }
    }

    pub fn with_selected(mut self, from: i64, to: i64) -> Self {
        self.selected = Some(Selection { from, to });
        self
    }

    pub fn with_formatter(
        mut self,
        format: impl Fn(i64) -> String + Send + Sync + 'static,
    ) -> Self {
        self.formatter = Some(Arc::new(format));
        self
    }
}

/// What the slider shows.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderView {
    pub from: String,
    pub to: String,
    /// Left thumb position in percent of the track.
    pub left: f64,
    /// Right thumb position in percent of the track.
    pub right: f64,
    pub dragging: bool,
}

struct Drag {
    thumb: Thumb,
    _capture: PointerCapture,
}

/// A range slider with two thumbs that cannot cross.
pub struct RangeSlider {
    config: SliderConfig,
    left: f64,
    right: f64,
    drag: Option<Drag>,
    surface: Box<dyn RenderSurface>,
}

impl fmt::Debug for RangeSlider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSlider")
            .field("config", &self.config)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("dragging", &self.drag.as_ref().map(|d| d.thumb))
            .finish_non_exhaustive()
    }
}

impl RangeSlider {
    /// Create a slider and mount it into `surface`.
    pub fn new(config: SliderConfig, surface: impl RenderSurface + 'static) -> Self {
        let selected = config.selected.unwrap_or(Selection {
            from: config.min,
            to: config.max,
        });
        let mut slider = Self {
            left: percent_of(&config, selected.from),
            right: percent_of(&config, selected.to),
            config,
            drag: None,
            surface: Box::new(surface),
        };
        let root = slider.element();
        slider.surface.mount(root);
        slider
    }

    /// The selected range.
    pub fn selected(&self) -> Selection {
        Selection {
            from: value_at(&self.config, self.left),
            to: value_at(&self.config, self.right),
        }
    }

    pub fn dragging(&self) -> Option<Thumb> {
        self.drag.as_ref().map(|d| d.thumb)
    }

    pub fn view(&self) -> SliderView {
        let selected = self.selected();
        SliderView {
            from: self.format(selected.from),
            to: self.format(selected.to),
            left: self.left,
            right: self.right,
            dragging: self.drag.is_some(),
        }
    }

    /// Start dragging `thumb`.
    pub fn grab(&mut self, thumb: Thumb) -> Result<()> {
        if self.drag.is_some() {
            return Err(Error::InvalidState("a thumb is already being dragged"));
        }
        let capture = self.surface.capture_pointer("range-slider");
        self.drag = Some(Drag {
            thumb,
            _capture: capture,
        });
        self.repaint()
    }

    /// Move the dragged thumb to pointer `x` over a track spanning
    /// `[track_left, track_left + track_width)`.
    pub fn drag_to(&mut self, x: i32, track_left: i32, track_width: i32) -> Result<()> {
        let Some(thumb) = self.dragging() else {
            return Err(Error::InvalidState("no thumb is being dragged"));
        };
        if track_width <= 0 {
            return Ok(());
        }

        let percent =
            (f64::from(x - track_left) / f64::from(track_width) * 100.0).clamp(0.0, 100.0);
        match thumb {
            Thumb::Left => self.left = percent.min(self.right),
            Thumb::Right => self.right = percent.max(self.left),
        }
        self.repaint()
    }

    /// Drop the dragged thumb and report the selected range.
    pub fn release(&mut self) -> Result<Option<RangeSelect>> {
        if self.drag.take().is_none() {
            return Ok(None);
        }
        self.repaint()?;

        let Selection { from, to } = self.selected();
        log::debug!("Range selected: {from}..={to}");
        Ok(Some(RangeSelect { from, to }))
    }

    /// Route a surface event. Returns the selection on release.
    pub fn handle_event(
        &mut self,
        event: &Event,
        layout: &LayoutResult,
    ) -> Result<Option<RangeSelect>> {
        match event {
            Event::PointerDown { x, y, .. } => {
                let Some(root) = self.surface.region(INNER) else {
                    return Ok(None);
                };
                let path = hit_test_path(layout, &root, *x, *y);
                let thumb = closest(&root, &path, |e| e.get_data(THUMB_ATTR).is_some())
                    .and_then(|e| e.get_data(THUMB_ATTR))
                    .and_then(|s| Thumb::parse(s));
                if let Some(thumb) = thumb {
                    self.grab(thumb)?;
                }
                Ok(None)
            }
            Event::PointerMove { x, .. } => {
                if self.drag.is_none() {
                    return Ok(None);
                }
                let Some(track) = self
                    .surface
                    .region(INNER)
                    .and_then(|inner| layout.get(&inner.id).copied())
                else {
                    return Ok(None);
                };
                self.drag_to(*x, track.x, track.width)?;
                Ok(None)
            }
            Event::PointerUp { .. } => self.release(),
            _ => Ok(None),
        }
    }

    pub fn destroy(&mut self) {
        self.drag = None;
        self.surface.unmount();
    }

    fn format(&self, value: i64) -> String {
        match &self.config.formatter {
            Some(format) => format(value),
            None => value.to_string(),
        }
    }

    fn repaint(&mut self) -> Result<()> {
        if !self.surface.is_mounted() {
            return Ok(());
        }
        let root = self.element();
        self.surface.mount(root);
        Ok(())
    }

    fn element(&self) -> Element {
        let view = self.view();
        let thumb = |thumb: Thumb, percent: f64| {
            Element::span()
                .id(format!("range-slider__thumb-{}", thumb.as_str()))
                .class(format!("range-slider__thumb-{}", thumb.as_str()))
                .data(THUMB_ATTR, thumb.as_str())
                .data("left", format!("{percent}%"))
                .height(1)
        };

        let mut root = Element::div()
            .class("range-slider")
            .child(Element::text(view.from.clone()).region(FROM))
            .child(
                Element::div()
                    .id("range-slider__inner")
                    .class("range-slider__inner")
                    .region(INNER)
                    .child(
                        Element::span()
                            .class("range-slider__progress")
                            .data("left", format!("{}%", view.left))
                            .data("right", format!("{}%", 100.0 - view.right)),
                    )
                    .child(thumb(Thumb::Left, view.left))
                    .child(thumb(Thumb::Right, view.right)),
            )
            .child(Element::text(view.to.clone()).region(TO));
        if view.dragging {
            root = root.class("range-slider_dragging");
        }
        root
    }
}

fn percent_of(config: &SliderConfig, value: i64) -> f64 {
    let span = config.max - config.min;
    if span <= 0 {
        return 0.0;
    }
    ((value - config.min) as f64 / span as f64 * 100.0).clamp(0.0, 100.0)
}

fn value_at(config: &SliderConfig, percent: f64) -> i64 {
    let span = (config.max - config.min) as f64;
    (config.min as f64 + percent / 100.0 * span).round() as i64
}
